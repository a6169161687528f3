use protocol::{FeatureCollection, ParkingId};
use runtime::{Store, StoreReader};

use crate::modal::ModalContent;

/// Shared state created at the composition root and handed to components.
///
/// Each slice has one owner that writes it; the rest read through
/// [`StoreReader`]s:
/// - map data: search header
/// - selection: map view (set), details panel and search header (clear)
/// - loading: whichever operation is in flight; a plain flag, so concurrent
///   operations can clear it under each other
/// - modal: any component that needs a dialog
#[derive(Debug, Clone)]
pub struct AppContext {
    pub map_data: Store<FeatureCollection>,
    pub selection: Store<Option<ParkingId>>,
    pub loading: Store<bool>,
    pub modal: Store<ModalContent>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            map_data: Store::new(FeatureCollection::initial()),
            selection: Store::new(None),
            loading: Store::new(false),
            modal: Store::new(ModalContent::hidden()),
        }
    }

    pub fn map_data_reader(&self) -> StoreReader<FeatureCollection> {
        self.map_data.reader()
    }

    pub fn selection_reader(&self) -> StoreReader<Option<ParkingId>> {
        self.selection.reader()
    }

    pub fn loading_reader(&self) -> StoreReader<bool> {
        self.loading.reader()
    }

    pub fn modal_reader(&self) -> StoreReader<ModalContent> {
        self.modal.reader()
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::AppContext;
    use foundation::DEFAULT_CENTER;

    #[test]
    fn starts_idle_on_default_view() {
        let ctx = AppContext::new();
        assert_eq!(ctx.map_data.with(|d| d.center()), DEFAULT_CENTER);
        assert_eq!(ctx.selection.get(), None);
        assert!(!ctx.loading.get());
        assert!(!ctx.modal.get().show);
    }

    #[test]
    fn clones_share_state() {
        let ctx = AppContext::new();
        let other = ctx.clone();
        other.loading.set(true);
        assert!(ctx.loading_reader().get());
    }
}
