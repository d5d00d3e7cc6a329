use std::fmt::Display;

use crate::error::RepositionError;
use crate::models::MarkerEntity;

/// Local copy of the marker data and its loading flag.
///
/// Positions only change through [`MarkerStore::settle`], after the
/// persistence call has answered, so a failed save leaves the last
/// known-good state in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerStore {
    markers: Vec<MarkerEntity>,
    is_loading: bool,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Replace the whole set with freshly loaded markers.
    pub fn replace_all(&mut self, markers: Vec<MarkerEntity>) {
        self.markers = markers.into_iter().map(MarkerEntity::normalized).collect();
        self.is_loading = false;
    }

    pub fn markers(&self) -> &[MarkerEntity] {
        &self.markers
    }

    pub fn get(&self, id: &str) -> Option<&MarkerEntity> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Apply the answer of a position update. The server's entity wins.
    pub fn settle<E: Display>(
        &mut self,
        result: Result<MarkerEntity, E>,
    ) -> Result<(), RepositionError> {
        let updated = result.map_err(|e| RepositionError::Persist(e.to_string()))?;
        let updated = updated.normalized();
        let slot = self
            .markers
            .iter_mut()
            .find(|m| m.id == updated.id)
            .ok_or_else(|| RepositionError::UnknownMarker(updated.id.clone()))?;
        tracing::debug!(
            marker = %updated.id,
            x = updated.normalized_x,
            y = updated.normalized_y,
            "marker position confirmed"
        );
        *slot = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarkerCategory;

    fn marker(id: &str, x: f64, y: f64) -> MarkerEntity {
        MarkerEntity {
            id: id.to_string(),
            normalized_x: x,
            normalized_y: y,
            icon_ref: String::new(),
            name_th: String::new(),
            name_en: None,
            description_th: String::new(),
            description_en: None,
            category: MarkerCategory::Bar,
            sub_district: None,
        }
    }

    fn loaded() -> MarkerStore {
        let mut store = MarkerStore::new();
        store.set_loading(true);
        store.replace_all(vec![marker("1", 10.0, 10.0), marker("2", 20.0, 20.0)]);
        store
    }

    #[test]
    fn test_replace_all_normalizes_and_clears_loading() {
        let mut store = MarkerStore::new();
        store.set_loading(true);
        store.replace_all(vec![marker("1", 150.0, f64::NAN)]);
        assert!(!store.is_loading());
        let m = store.get("1").unwrap();
        assert_eq!((m.normalized_x, m.normalized_y), (100.0, 0.0));
        assert_eq!(m.icon_ref, MarkerCategory::Bar.pin_icon());
    }

    #[test]
    fn test_settle_success_replaces_by_id() {
        let mut store = loaded();
        let result: Result<_, String> = Ok(marker("2", 60.0, 70.0));
        store.settle(result).unwrap();
        let m = store.get("2").unwrap();
        assert_eq!((m.normalized_x, m.normalized_y), (60.0, 70.0));
        assert_eq!(store.get("1").unwrap().normalized_x, 10.0);
    }

    #[test]
    fn test_settle_failure_leaves_state_unchanged() {
        let mut store = loaded();
        let before = store.clone();
        let result: Result<MarkerEntity, _> = Err("500 Internal Server Error");
        assert_eq!(
            store.settle(result),
            Err(RepositionError::Persist("500 Internal Server Error".into()))
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_settle_unknown_marker() {
        let mut store = loaded();
        let result: Result<_, String> = Ok(marker("99", 1.0, 1.0));
        assert_eq!(
            store.settle(result),
            Err(RepositionError::UnknownMarker("99".into()))
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = loaded();
        store.settle(Ok::<_, String>(marker("1", 30.0, 30.0))).unwrap();
        store.settle(Ok::<_, String>(marker("1", 40.0, 45.0))).unwrap();
        let m = store.get("1").unwrap();
        assert_eq!((m.normalized_x, m.normalized_y), (40.0, 45.0));
    }
}
