//! Facade: one call that brings a charger up across the IoT and database
//! subsystems.

#[derive(Debug, Default, Clone, Copy)]
pub struct DbSubsystem;

impl DbSubsystem {
    pub fn check_charger_in_shadow_table(&self) -> &'static str {
        "Charger got to shadow table!\n"
    }

    pub fn check_charger_in_cloud_table(&self) -> &'static str {
        "Charger got to cloud table!\n"
    }

    pub fn check_charger_in_es(&self) -> &'static str {
        "Charger got to UI!\n"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IotSubsystem;

impl IotSubsystem {
    pub fn create_thing(&self) -> &'static str {
        "Charger's thing is created!\n"
    }

    pub fn add_shadow_to_thing(&self) -> &'static str {
        "Shadow added to charger's thing!\n"
    }
}

#[derive(Debug, Default)]
pub struct AwsFacade {
    db: DbSubsystem,
    iot: IotSubsystem,
}

impl AwsFacade {
    /// Reuses subsystems the client already built; missing ones are created.
    pub fn new(db: Option<DbSubsystem>, iot: Option<IotSubsystem>) -> Self {
        AwsFacade {
            db: db.unwrap_or_default(),
            iot: iot.unwrap_or_default(),
        }
    }

    pub fn db(&self) -> &DbSubsystem {
        &self.db
    }

    pub fn iot(&self) -> &IotSubsystem {
        &self.iot
    }

    pub fn initialize_charger(&self) -> String {
        let steps = [
            self.iot.create_thing(),
            self.iot.add_shadow_to_thing(),
            self.db.check_charger_in_shadow_table(),
            self.db.check_charger_in_cloud_table(),
            self.db.check_charger_in_es(),
        ];
        format!("Charger initialized:\n{}", steps.concat())
    }
}

pub fn client_code(facade: &AwsFacade) -> String {
    facade.initialize_charger()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: &str = "Charger initialized:\n\
        Charger's thing is created!\n\
        Shadow added to charger's thing!\n\
        Charger got to shadow table!\n\
        Charger got to cloud table!\n\
        Charger got to UI!\n";

    #[test]
    fn test_initialize_with_given_subsystems() {
        let facade = AwsFacade::new(Some(DbSubsystem), Some(IotSubsystem));
        assert_eq!(client_code(&facade), EXPECTED);
    }

    #[test]
    fn test_initialize_with_default_subsystems() {
        assert_eq!(AwsFacade::default().initialize_charger(), EXPECTED);
        assert_eq!(AwsFacade::new(None, None).initialize_charger(), EXPECTED);
    }

    #[test]
    fn test_subsystems_usable_directly() {
        let facade = AwsFacade::default();
        assert_eq!(facade.iot().create_thing(), "Charger's thing is created!\n");
        assert_eq!(facade.db().check_charger_in_es(), "Charger got to UI!\n");
    }
}
