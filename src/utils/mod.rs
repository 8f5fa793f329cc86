pub mod day_name;
