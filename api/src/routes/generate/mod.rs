pub mod generate_take_route;
