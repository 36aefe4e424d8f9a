//! Client-side persisted storage port
//!
//! The page reads its debug flag from persisted key/value storage
//! (browser `localStorage` on the live site).

/// Storage key holding the debug flag
pub const DEBUG_KEY: &str = "debug";

/// Port trait for key/value client storage
pub trait ClientStorage: Send + Sync {
    /// Read an item; `None` when the key is not set
    fn get_item(&self, key: &str) -> Option<String>;

    /// Whether the debug flag is set to exactly `"true"`
    fn debug_enabled(&self) -> bool {
        self.get_item(DEBUG_KEY).as_deref() == Some("true")
    }
}
