use colored::Colorize;
use structural_patterns::flyweight::{
    add_car_to_police_database, seed_catalog, CarModel, FlyweightFactory,
};
use structural_patterns::{logging, Result};

fn add_car(
    factory: &mut FlyweightFactory,
    plates: &str,
    owner: &str,
    brand: &str,
    model: &str,
    color: &str,
) {
    println!("\n\n{}", "Client: Adding a car to database.".bold());
    let record = add_car_to_police_database(factory, plates, owner, brand, model, color);
    println!("{}", record.lookup);
    print!("{}", record.rendered);
}

fn main() -> Result<()> {
    logging::init();

    let cars = seed_catalog()?;
    let factory = &mut FlyweightFactory::new(cars.iter().map(CarModel::shared_state));

    print!("{}", factory.list_flyweights());

    add_car(factory, "CL234IR", "James Doe", "BMW", "M5", "red");
    add_car(factory, "CL234IR", "James Doe", "BMW", "X1", "red");

    println!("\n");
    println!("{}", factory.list_flyweights());
    Ok(())
}
