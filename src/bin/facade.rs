use structural_patterns::facade::{client_code, AwsFacade, DbSubsystem, IotSubsystem};
use structural_patterns::logging;

fn main() {
    logging::init();

    // Subsystems the client already has are handed to the facade as-is.
    let db = DbSubsystem;
    let iot = IotSubsystem;
    let facade = AwsFacade::new(Some(db), Some(iot));
    print!("{}", client_code(&facade));
}
