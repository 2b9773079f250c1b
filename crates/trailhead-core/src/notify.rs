use std::sync::Mutex;

/// Fire-and-forget message delivery, independent of the current
/// request/response cycle. Implementations must not fail the calling
/// operation; a lost notification is logged, not surfaced.
pub trait Notifier {
    fn notify(&self, user_id: u64, message: &str);
}

/// Logs notifications instead of delivering them. Default for the CLI,
/// where there is no chat transport behind the core.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, user_id: u64, message: &str) {
        tracing::info!(user_id, message, "notification");
    }
}

/// Collects notifications in memory; used by tests and embedders that
/// deliver on their own schedule.
#[derive(Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<(u64, String)>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(u64, String)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, user_id: u64, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((user_id, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(1, "first");
        notifier.notify(2, "second");
        assert_eq!(
            notifier.messages(),
            [(1, "first".to_string()), (2, "second".to_string())]
        );
    }
}
