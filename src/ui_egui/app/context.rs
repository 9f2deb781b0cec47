use crate::config::Config;
use crate::services::database::Database;
use crate::services::entry_store::SqliteEntryStore;
use crate::services::habit::HabitService;
use crate::services::settings::SettingsService;

/// Shared access point for services and resources that multiple app modules need.
pub struct AppContext {
    database: &'static Database,
    config: Config,
}

impl AppContext {
    pub fn new(database: &'static Database, config: Config) -> Self {
        Self { database, config }
    }

    pub fn database(&self) -> &'static Database {
        self.database
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings_service(&self) -> SettingsService<'static> {
        SettingsService::new(self.database)
    }

    pub fn entry_store(&self) -> SqliteEntryStore<'static> {
        SqliteEntryStore::new(self.database)
    }

    pub fn habit_service(&self) -> HabitService<'static> {
        HabitService::new(self.database)
    }
}
