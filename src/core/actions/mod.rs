pub mod compute_field;
