pub mod coordinate_mapper;
