use super::query::Query;
use crate::core::RowView;
use crate::json::ValueConverter;
use log::debug;

impl Query<'_> {
    /// Apply `patch` to every matched row.
    ///
    /// Keys that are not columns of the table are dropped and the remaining
    /// values are coerced to their column types. Returns `false` without
    /// touching anything when no key survives.
    pub fn update(self, patch: impl Into<RowView>) -> bool {
        let patch = patch.into();
        let Some(table) = self.table() else {
            return false;
        };

        let patch: RowView = patch
            .iter()
            .filter_map(|(key, value)| {
                table
                    .column(key)
                    .map(|column| (key.to_string(), ValueConverter::coerce(column.column_type, value)))
            })
            .collect();
        if patch.is_empty() {
            return false;
        }

        let mut table = table.clone();
        for (index, view) in &self.matches {
            let mut view = view.clone();
            for (key, value) in patch.iter() {
                view.insert(key, value.clone());
            }
            let row = table.encode(&view);
            table.set_row(*index, row);
        }

        debug!(
            "Updated {} row(s) in '{}'",
            self.matches.len(),
            self.table_name
        );
        self.document.put_table(self.table_name, table);
        true
    }
}
