use std::sync::Arc;

use super::context::AppContext;
use super::toast::ToastManager;
use super::{JournalApp, MIN_ROOT_HEIGHT, MIN_ROOT_WIDTH};
use crate::config::{self, Config};
use crate::models::settings::{Settings, THEME_DARK, THEME_LIGHT};
use crate::services::calendar_sync::{GoogleCalendarClient, SyncWorker};
use crate::services::database::Database;
use crate::models::daily_entry::DailyEntry;
use crate::services::entry_store::load_entry;
use crate::services::timeline::{
    ColorCycle, GridClock, SwipeConfig, SwipeTracker, TimelineController, TimestampIdGenerator,
};
use chrono::Local;

impl JournalApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Leaked for the 'static lifetime the app context hands out.
        let database: &'static Database = Box::leak(Box::new(initialize_database()));

        let config = Config::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({:#}); calendar sync disabled", e);
            Config::default()
        });

        let context = AppContext::new(database, config);
        let settings = context.settings_service().get_or_default();
        log::info!(
            "Loaded settings: {}:00-{}:00, {} min snap",
            settings.day_start_hour,
            settings.day_end_hour,
            settings.snap_minutes
        );

        let controller = TimelineController::new(
            grid_clock_for(&settings),
            Box::new(TimestampIdGenerator::new()),
            ColorCycle::from_clock(),
        );
        let sync_worker = build_sync_worker(context.config());

        let current_date = Local::now().date_naive();
        let mut app = Self {
            context,
            settings,
            settings_draft: None,
            current_date,
            timeline: Vec::new(),
            journal: DailyEntry::new(current_date),
            habits: Vec::new(),
            pending_habit_delete: None,
            controller,
            swipe: SwipeTracker::new(SwipeConfig::default()),
            sync_worker,
            toast_manager: ToastManager::new(),
            is_dark: false,
        };

        if app.context.database().is_in_memory() {
            app.toast_manager
                .warning("Journal database unavailable; changes will not be kept");
        }

        app.reload_habits();
        app.reload_day();
        app.apply_theme(&cc.egui_ctx);
        app
    }

    pub fn native_options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title("Day Journal")
                .with_inner_size([480.0, 820.0])
                .with_min_inner_size([MIN_ROOT_WIDTH, MIN_ROOT_HEIGHT]),
            ..Default::default()
        }
    }

    pub(super) fn apply_theme(&mut self, ctx: &egui::Context) {
        self.is_dark = match self.settings.theme.as_str() {
            THEME_DARK => true,
            THEME_LIGHT => false,
            _ => matches!(dark_light::detect(), dark_light::Mode::Dark),
        };

        ctx.set_visuals(if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
    }

    /// Load the stored entry for `current_date`: its timeline and its
    /// journal fields.
    pub(super) fn reload_day(&mut self) {
        let store = self.context.entry_store();
        let entry = match load_entry(&store, self.current_date) {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("Failed to load entry for {}: {:#}", self.current_date, e);
                self.toast_manager
                    .error(format!("Could not load {}: {}", self.current_date, e));
                DailyEntry::new(self.current_date)
            }
        };
        self.timeline = entry.timeline.clone();
        self.journal = entry;
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_sync(ctx);
        self.handle_keyboard_navigation(ctx);

        self.render_top_bar(ctx);
        self.render_main_panel(ctx);
        self.render_editor(ctx);
        self.render_settings_window(ctx);

        self.toast_manager.render(ctx, self.is_dark);
    }
}

fn initialize_database() -> Database {
    let db_path = config::database_path();
    match Database::open_or_in_memory(&db_path) {
        Ok(db) => db,
        Err(e) => {
            // open_or_in_memory only fails when SQLite itself is unusable.
            log::error!("Failed to create in-memory database: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn grid_clock_for(settings: &Settings) -> GridClock {
    GridClock::from_settings(settings).unwrap_or_else(|e| {
        log::warn!("Invalid timeline settings ({}); using defaults", e);
        GridClock::default()
    })
}

fn build_sync_worker(config: &Config) -> Option<SyncWorker> {
    if !config.is_sync_configured() {
        log::info!("No Google Calendar token configured; sync disabled");
        return None;
    }
    let token = config.access_token()?;
    match GoogleCalendarClient::new(token, config.google.calendar_id.clone()) {
        Ok(client) => Some(SyncWorker::new(Arc::new(
            client.with_base_url(config.google.api_base.clone()),
        ))),
        Err(e) => {
            log::warn!("Calendar sync unavailable: {:#}", e);
            None
        }
    }
}
