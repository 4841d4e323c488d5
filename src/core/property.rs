use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Change notifications for one `Property`.
///
/// Changes published while nobody was waiting collapse into a single
/// signal; read the property afterwards for the latest value.
pub struct PropertySubscriber<T> {
    receiver: watch::Receiver<T>,
}

impl<T> PropertySubscriber<T> {
    /// Wait for the next publish. Returns `false` once the owning
    /// controller is gone.
    pub async fn wait_for_change(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Whether something was published since the last check.
    pub fn try_recv(&mut self) -> bool {
        match self.receiver.has_changed() {
            Ok(true) => {
                self.receiver.mark_unchanged();
                true
            }
            Ok(false) | Err(_) => false,
        }
    }
}

/// Observable value: current snapshot plus change notification.
///
/// Clones share the same value. Only the owning controller can publish;
/// the presentation layer reads and subscribes.
pub struct Property<T> {
    sender: Arc<watch::Sender<T>>,
    name: Arc<str>,
}

impl<T: Clone + Send + Sync> Property<T> {
    pub(crate) fn new(initial_value: T, name: impl Into<String>) -> Self {
        Self {
            sender: Arc::new(watch::Sender::new(initial_value)),
            name: Arc::from(name.into()),
        }
    }

    pub async fn get(&self) -> T {
        self.get_sync()
    }

    pub fn get_sync(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Read the current value in place without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.sender.borrow())
    }

    pub(crate) fn set(&self, new_value: T) {
        self.sender.send_replace(new_value);
    }

    /// Read-modify-write as one step: concurrent updaters never see or
    /// overwrite a stale copy of the value.
    pub(crate) fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(updater);
    }

    pub fn subscribe(&self) -> PropertySubscriber<T> {
        PropertySubscriber {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            name: self.name.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property({}: {:?})", self.name, *self.sender.borrow())
    }
}
