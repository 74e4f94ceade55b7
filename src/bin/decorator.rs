use colored::Colorize;
use structural_patterns::decorator::{
    client_code, BasicSessionDataReporter, MqttReporterDecorator, ShadowReporterDecorator,
};
use structural_patterns::logging;

fn main() {
    logging::init();

    let just_basic_data = BasicSessionDataReporter;
    println!("{}", "Client: I've got a simple component:".bold());
    println!("{}", client_code(&just_basic_data));
    println!();

    // Decorators wrap plain components as well as other decorators.
    let with_meter_values_to_shadow = ShadowReporterDecorator::new(just_basic_data);
    let with_meter_values_to_mqtt = MqttReporterDecorator::new(with_meter_values_to_shadow);
    println!("{}", "Client: Now I've got a decorated component:".bold());
    println!("{}", client_code(&with_meter_values_to_mqtt));
}
