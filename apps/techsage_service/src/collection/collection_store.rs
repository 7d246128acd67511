use super::{
    collection_export::render_collection,
    collection_model::{SavedResult, SavedResultView},
};
use crate::app_error::AppError;

/// Saved results of one session, kept in insertion order.
///
/// Positions handed to [`ResultCollection::delete`] are display positions:
/// the collection is shown newest first, so position 0 is the most recent
/// entry.
#[derive(Debug, Clone, Default)]
pub struct ResultCollection {
    entries: Vec<SavedResult>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, result: SavedResult) {
        self.entries.push(result);
    }

    pub fn delete(&mut self, display_index: usize) -> Result<SavedResult, AppError> {
        let len = self.entries.len();
        if display_index >= len {
            return Err(AppError::Index {
                index: display_index,
                len,
            });
        }

        Ok(self.entries.remove(len - 1 - display_index))
    }

    pub fn list(&self) -> &[SavedResult] {
        &self.entries
    }

    pub fn list_newest_first(&self) -> impl Iterator<Item = SavedResultView> + '_ {
        let len = self.entries.len();
        self.entries
            .iter()
            .rev()
            .enumerate()
            .map(move |(index, result)| SavedResultView {
                index,
                item_number: len - index,
                result: result.clone(),
            })
    }

    pub fn export(&self) -> String {
        render_collection(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection_of(titles: &[&str]) -> ResultCollection {
        let mut collection = ResultCollection::new();
        for title in titles {
            collection.append(SavedResult::new(*title, "ctx", "content"));
        }
        collection
    }

    fn titles(collection: &ResultCollection) -> Vec<&str> {
        collection.list().iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn list_preserves_insertion_order() {
        let collection = collection_of(&["first", "second", "third", "second"]);

        assert_eq!(collection.len(), 4);
        assert_eq!(titles(&collection), vec!["first", "second", "third", "second"]);
    }

    #[test]
    fn delete_position_zero_removes_newest() {
        let mut collection = collection_of(&["one", "two", "three"]);

        let removed = collection.delete(0).unwrap();

        assert_eq!(removed.title, "three");
        assert_eq!(collection.len(), 2);
        assert_eq!(titles(&collection), vec!["one", "two"]);
    }

    #[test]
    fn delete_last_display_position_removes_oldest() {
        let mut collection = collection_of(&["one", "two", "three"]);

        let removed = collection.delete(2).unwrap();

        assert_eq!(removed.title, "one");
        assert_eq!(titles(&collection), vec!["two", "three"]);
    }

    #[test]
    fn out_of_range_delete_leaves_collection_untouched() {
        let mut collection = collection_of(&["one", "two"]);

        let err = collection.delete(2).unwrap_err();

        assert!(matches!(err, AppError::Index { index: 2, len: 2 }));
        assert_eq!(titles(&collection), vec!["one", "two"]);

        let mut empty = ResultCollection::new();
        assert!(empty.delete(0).is_err());
        assert!(empty.is_empty());
    }

    #[test]
    fn newest_first_view_numbers_items() {
        let collection = collection_of(&["one", "two", "three"]);

        let views: Vec<SavedResultView> = collection.list_newest_first().collect();

        assert_eq!(views.len(), 3);
        assert_eq!(views[0].index, 0);
        assert_eq!(views[0].item_number, 3);
        assert_eq!(views[0].result.title, "three");
        assert_eq!(views[2].item_number, 1);
        assert_eq!(views[2].result.title, "one");
    }

    #[test]
    fn export_contains_every_block() {
        let mut collection = ResultCollection::new();
        collection.append(SavedResult::new("A", "c1", "r1"));
        collection.append(SavedResult::new("B", "c2", "r2"));

        let document = collection.export();
        let rule = "-".repeat(40);

        assert!(document.starts_with("--- TECHSAGE COLLECTION ---\n\n"));
        let a = document.find("TITLE: A\nCONTEXT: c1\nRESULT:\nr1\n").unwrap();
        let b = document.find("TITLE: B\nCONTEXT: c2\nRESULT:\nr2\n").unwrap();
        assert!(a < b);
        assert_eq!(document.matches(&format!("{}\n\n", rule)).count(), 2);
    }
}
