use structural_patterns::bridge::{
    client_code, AbstractApi, CloudApiImplementation, ExternalApiImplementation,
};
use structural_patterns::logging;

fn main() {
    logging::init();

    // Any abstraction/implementation pair wired up front works with the client.
    let abstraction = AbstractApi::new(Box::new(CloudApiImplementation));
    println!("{}", client_code(&abstraction));

    println!();

    let abstraction = AbstractApi::new(Box::new(ExternalApiImplementation::new()));
    println!("{}", client_code(&abstraction));
}
