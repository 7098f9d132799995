mod settings;

pub use settings::{
    AuthSettings, DatabaseSettings, HistorySettings, ModelSettings, ServerSettings, Settings,
};
