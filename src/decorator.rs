//! Decorator: charging-session reporters stacked on top of each other.

use std::cell::Cell;

pub trait DataReporter {
    fn report_data(&self) -> String;
}

impl<R: DataReporter + ?Sized> DataReporter for Box<R> {
    fn report_data(&self) -> String {
        (**self).report_data()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BasicSessionDataReporter;

impl DataReporter for BasicSessionDataReporter {
    fn report_data(&self) -> String {
        "I'm reporting basic charging session data to device' shadow".to_owned()
    }
}

/// Adds meter values to the device shadow on top of whatever `R` reports.
pub struct ShadowReporterDecorator<R> {
    reporter: R,
}

impl<R: DataReporter> ShadowReporterDecorator<R> {
    pub fn new(reporter: R) -> Self {
        ShadowReporterDecorator { reporter }
    }
}

impl<R: DataReporter> DataReporter for ShadowReporterDecorator<R> {
    fn report_data(&self) -> String {
        format!(
            "{} and added meter values to device' shadow",
            self.reporter.report_data()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MqttClientState {
    Up,
    Down,
}

/// Publishes meter values over MQTT. The client is only up for the duration
/// of a single `report_data` call.
pub struct MqttReporterDecorator<R> {
    reporter: R,
    client: Cell<MqttClientState>,
}

impl<R: DataReporter> MqttReporterDecorator<R> {
    pub fn new(reporter: R) -> Self {
        MqttReporterDecorator {
            reporter,
            client: Cell::new(MqttClientState::Down),
        }
    }

    pub fn client_state(&self) -> MqttClientState {
        self.client.get()
    }

    pub fn setup_mqtt_client(&self) -> &'static str {
        self.client.set(MqttClientState::Up);
        tracing::trace!("MQTT client up");
        "MQTT Client is set up."
    }

    pub fn teardown_mqtt_client(&self) -> &'static str {
        self.client.set(MqttClientState::Down);
        tracing::trace!("MQTT client down");
        "MQTT Client is teared down."
    }
}

impl<R: DataReporter> DataReporter for MqttReporterDecorator<R> {
    fn report_data(&self) -> String {
        self.setup_mqtt_client();
        let reported = format!(
            "{} and sent meter values to MQTT topic",
            self.reporter.report_data()
        );
        self.teardown_mqtt_client();
        reported
    }
}

pub fn client_code(component: &dyn DataReporter) -> String {
    format!("RESULT: {}", component.report_data())
}
