use super::query::Query;
use im::Vector;
use log::debug;

impl Query<'_> {
    /// Remove every matched row. Returns how many were removed.
    pub fn delete(self) -> usize {
        let Some(table) = self.table() else {
            return 0;
        };
        if self.matches.is_empty() {
            return 0;
        }

        let mut table = table.clone();
        let mut doomed = self.matches.iter().map(|(index, _)| *index).peekable();
        let kept: Vector<_> = table
            .data()
            .iter()
            .enumerate()
            .filter(|(index, _)| {
                if doomed.peek() == Some(index) {
                    doomed.next();
                    false
                } else {
                    true
                }
            })
            .map(|(_, row)| row.clone())
            .collect();

        let removed = table.row_count() - kept.len();
        table.replace_data(kept);
        debug!("Deleted {} row(s) from '{}'", removed, self.table_name);
        self.document.put_table(self.table_name, table);
        removed
    }
}
