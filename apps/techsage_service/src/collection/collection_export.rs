use super::collection_model::SavedResult;

pub const EXPORT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const EXPORT_CONTENT_DISPOSITION: &str =
    "attachment; filename=\"my_techsage_collection.txt\"";

const EXPORT_HEADER: &str = "--- TECHSAGE COLLECTION ---\n\n";
const RULE_WIDTH: usize = 40;

/// Renders entries, in the order given, as one plain-text document.
pub fn render_collection<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a SavedResult>,
{
    let rule = "-".repeat(RULE_WIDTH);
    let mut document = String::from(EXPORT_HEADER);

    for entry in entries {
        document.push_str(&format!(
            "TITLE: {}\nCONTEXT: {}\nRESULT:\n{}\n{}\n\n",
            entry.title, entry.context, entry.content, rule
        ));
    }

    document
}
