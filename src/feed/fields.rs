// src/feed/fields.rs
//! Element-name → output-field table for Goodreads items.

use super::types::BookEntry;

/// Which `BookEntry` slot an element fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Guid,
    PubDate,
    Title,
    Link,
    Id,
    BookImageUrl,
    BookSmallImageUrl,
    BookMediumImageUrl,
    BookLargeImageUrl,
    BookDescription,
    AuthorName,
    Isbn,
    UserName,
    UserRating,
    UserReadAt,
    UserDateAdded,
    UserDateCreated,
    UserShelves,
    UserReview,
    AverageRating,
    BookPublished,
    Content,
}

/// Standard RSS item elements.
pub const STANDARD_FIELDS: &[(&str, Field)] = &[
    ("guid", Field::Guid),
    ("title", Field::Title),
    ("link", Field::Link),
    ("pubDate", Field::PubDate),
    ("description", Field::Content),
];

/// Goodreads vendor elements, in feed order.
pub const CUSTOM_FIELDS: &[(&str, Field)] = &[
    ("book_id", Field::Id),
    ("book_image_url", Field::BookImageUrl),
    ("book_small_image_url", Field::BookSmallImageUrl),
    ("book_medium_image_url", Field::BookMediumImageUrl),
    ("book_large_image_url", Field::BookLargeImageUrl),
    ("book_description", Field::BookDescription),
    ("author_name", Field::AuthorName),
    ("isbn", Field::Isbn),
    ("user_name", Field::UserName),
    ("user_rating", Field::UserRating),
    ("user_read_at", Field::UserReadAt),
    ("user_date_added", Field::UserDateAdded),
    ("user_date_created", Field::UserDateCreated),
    ("user_shelves", Field::UserShelves),
    ("user_review", Field::UserReview),
    ("average_rating", Field::AverageRating),
    ("book_published", Field::BookPublished),
];

/// Atom `<entry>` children. `link` is handled separately (it lives in `href`).
pub const ATOM_FIELDS: &[(&str, Field)] = &[
    ("id", Field::Guid),
    ("title", Field::Title),
    ("published", Field::PubDate),
    ("content", Field::Content),
];

/// Atom elements that only fill a slot the primary element left empty.
pub const ATOM_FALLBACK_FIELDS: &[(&str, Field)] = &[
    ("updated", Field::PubDate),
    ("summary", Field::Content),
];

pub fn lookup(table: &[(&str, Field)], element: &str) -> Option<Field> {
    table
        .iter()
        .find(|(name, _)| *name == element)
        .map(|(_, field)| *field)
}

/// Resolve an RSS `<item>` child element name.
pub fn rss_field(element: &str) -> Option<Field> {
    lookup(STANDARD_FIELDS, element).or_else(|| lookup(CUSTOM_FIELDS, element))
}

pub fn atom_field(element: &str) -> Option<Field> {
    lookup(ATOM_FIELDS, element).or_else(|| lookup(CUSTOM_FIELDS, element))
}

impl Field {
    /// Mutable handle to the optional slot. `title`/`link` are required
    /// strings and are handled by the caller.
    pub fn slot<'a>(&self, entry: &'a mut BookEntry) -> Option<&'a mut Option<String>> {
        let slot = match self {
            Field::Title | Field::Link => return None,
            Field::Guid => &mut entry.guid,
            Field::PubDate => &mut entry.pub_date,
            Field::Id => &mut entry.id,
            Field::BookImageUrl => &mut entry.book_image_url,
            Field::BookSmallImageUrl => &mut entry.book_small_image_url,
            Field::BookMediumImageUrl => &mut entry.book_medium_image_url,
            Field::BookLargeImageUrl => &mut entry.book_large_image_url,
            Field::BookDescription => &mut entry.book_description,
            Field::AuthorName => &mut entry.author_name,
            Field::Isbn => &mut entry.isbn,
            Field::UserName => &mut entry.user_name,
            Field::UserRating => &mut entry.user_rating,
            Field::UserReadAt => &mut entry.user_read_at,
            Field::UserDateAdded => &mut entry.user_date_added,
            Field::UserDateCreated => &mut entry.user_date_created,
            Field::UserShelves => &mut entry.user_shelves,
            Field::UserReview => &mut entry.user_review,
            Field::AverageRating => &mut entry.average_rating,
            Field::BookPublished => &mut entry.book_published,
            Field::Content => &mut entry.content,
        };
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_names_map_to_fields() {
        assert_eq!(rss_field("book_id"), Some(Field::Id));
        assert_eq!(rss_field("user_shelves"), Some(Field::UserShelves));
        assert_eq!(rss_field("description"), Some(Field::Content));
        assert_eq!(rss_field("num_pages"), None);
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(rss_field("Book_Id"), None);
        assert_eq!(rss_field("pubdate"), None);
    }

    #[test]
    fn atom_prefers_atom_names_then_custom() {
        assert_eq!(atom_field("id"), Some(Field::Guid));
        assert_eq!(atom_field("author_name"), Some(Field::AuthorName));
        assert_eq!(atom_field("guid"), None);
    }
}
