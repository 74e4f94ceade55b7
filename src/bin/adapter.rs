use colored::Colorize;
use structural_patterns::adapter::{client_code, Adaptee, Adapter, Service, TargetService};
use structural_patterns::{logging, PatternError};

fn run(service: &dyn Service) {
    match client_code(service) {
        Ok(data) => print!("{}", serde_json::Value::Object(data)),
        Err(err @ PatternError::MissingCapability { .. }) => print!("{err}"),
        Err(err) => print!("{}", err.to_string().red()),
    }
    println!("\n");
}

fn main() {
    logging::init();

    println!("{}", "Client works fine with Target interface:".bold());
    run(&TargetService);

    println!("{}", "Client could not work with Adaptee interface:".bold());
    run(&Adaptee);

    println!("{}", "But client could work with Adaptee service using Adapter:".bold());
    run(&Adapter::new(Adaptee));
}
