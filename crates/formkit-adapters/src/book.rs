//! The `Book` model: eight fields composed into one [`FieldSet`].

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chrono::NaiveDate;
use formkit_core::{
    application::AppError,
    domain::{
        Field, FieldError, FieldKey, FieldMut, FieldSet, FieldValue, Model, Snapshot,
        WriteOutcome,
    },
    error::FormkitResult,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::filters::{optional, trim};

/// Field names, in display order.
pub mod names {
    pub const ID: &str = "Id";
    pub const TITLE: &str = "Title";
    pub const AUTHOR: &str = "Author";
    pub const PUBLISHER: &str = "Publisher";
    pub const CATEGORY: &str = "Category";
    pub const PRICE: &str = "Price";
    pub const PURCHASE_DATE: &str = "PurchaseDate";
    pub const REVIEW_POINT: &str = "ReviewPoint";

    pub const ALL: [&str; 8] = [
        ID,
        TITLE,
        AUTHOR,
        PUBLISHER,
        CATEGORY,
        PRICE,
        PURCHASE_DATE,
        REVIEW_POINT,
    ];
}

// ============================================================================
// BookCategory
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookCategory {
    Novel,
    Nonfiction,
    Comic,
}

impl BookCategory {
    pub const ALL: [Self; 3] = [Self::Novel, Self::Nonfiction, Self::Comic];

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Novel => "Novel",
            Self::Nonfiction => "Nonfiction",
            Self::Comic => "Comic",
        }
    }
}

impl fmt::Display for BookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category '{0}' (expected novel, nonfiction or comic)")]
pub struct UnknownCategory(String);

impl FromStr for BookCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

// ============================================================================
// BookRecord
// ============================================================================

/// Plain data view of a book, for listing and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub category: Option<BookCategory>,
    pub price: Option<i64>,
    pub purchase_date: Option<NaiveDate>,
    pub review_point: Option<i32>,
}

impl BookRecord {
    /// Read a record back out of a book snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> FormkitResult<Self> {
        Ok(Self {
            id: *snapshot.get::<u32>(names::ID)?,
            title: snapshot.get::<Option<String>>(names::TITLE)?.clone(),
            author: snapshot.get::<Option<String>>(names::AUTHOR)?.clone(),
            publisher: snapshot.get::<Option<String>>(names::PUBLISHER)?.clone(),
            category: *snapshot.get::<Option<BookCategory>>(names::CATEGORY)?,
            price: *snapshot.get::<Option<i64>>(names::PRICE)?,
            purchase_date: *snapshot.get::<Option<NaiveDate>>(names::PURCHASE_DATE)?,
            review_point: *snapshot.get::<Option<i32>>(names::REVIEW_POINT)?,
        })
    }
}

// ============================================================================
// Book
// ============================================================================

pub struct Book {
    set: FieldSet,
    id: FieldKey<u32>,
    title: FieldKey<Option<String>>,
    author: FieldKey<Option<String>>,
    publisher: FieldKey<Option<String>>,
    category: FieldKey<Option<BookCategory>>,
    price: FieldKey<Option<i64>>,
    purchase_date: FieldKey<Option<NaiveDate>>,
    review_point: FieldKey<Option<i32>>,
}

fn required_text(
    field: &mut Field<Option<String>>,
    message: &'static str,
    description: &'static str,
) {
    field.create_validator(|s| s.as_deref().is_some_and(|s| !s.is_empty()), message);
    field.set_io_filter(Some(Rc::new(optional(trim))));
    field.set_description(Some(description.into()));
}

impl Book {
    /// A blank, unsaved book (id 0).
    pub fn new() -> Self {
        let mut set = FieldSet::new();

        let id = set.create_field(names::ID, 0_u32, true, true);
        let title = set.create_field_with(names::TITLE, None::<String>, |f| {
            required_text(f, "Title is required.", "Enter the book title.");
        });
        let author = set.create_field_with(names::AUTHOR, None::<String>, |f| {
            required_text(f, "Author is required.", "Enter the author name.");
        });
        let publisher = set.create_field_with(names::PUBLISHER, None::<String>, |f| {
            required_text(f, "Publisher is required.", "Enter the publisher name.");
        });
        let category = set.create_field_with(names::CATEGORY, None::<BookCategory>, |f| {
            f.create_validator(Option::is_some, "Category is required.");
            f.set_description(Some("Choose a category.".into()));
        });
        let price = set.create_field_with(names::PRICE, None::<i64>, |f| {
            f.create_validator(|n| n.is_some_and(|n| n >= 0), "Price is invalid.");
            f.set_description(Some("Enter the price.".into()));
        });
        let purchase_date = set.create_field_with(names::PURCHASE_DATE, None::<NaiveDate>, |f| {
            f.create_validator(Option::is_some, "Purchase date is required.");
            f.set_description(Some("Enter the purchase date.".into()));
        });
        let review_point = set.create_field_with(names::REVIEW_POINT, None::<i32>, |f| {
            f.create_validator(
                |n| n.is_some_and(|n| (0..=5).contains(&n)),
                "Review point is invalid.",
            );
            f.set_description(Some("Rate the book from 0 to 5.".into()));
        });

        Self {
            set,
            id,
            title,
            author,
            publisher,
            category,
            price,
            purchase_date,
            review_point,
        }
    }

    /// A clean book loaded from stored values.
    pub fn from_record(record: &BookRecord) -> Self {
        let mut book = Self::new();
        book.load(record);
        book
    }

    /// Overwrite every field and baseline with `record`, leaving the book
    /// clean.
    pub fn load(&mut self, record: &BookRecord) {
        self.field_mut(self.id).init(record.id);
        self.field_mut(self.title).init(record.title.clone());
        self.field_mut(self.author).init(record.author.clone());
        self.field_mut(self.publisher).init(record.publisher.clone());
        self.field_mut(self.category).init(record.category);
        self.field_mut(self.price).init(record.price);
        self.field_mut(self.purchase_date).init(record.purchase_date);
        self.field_mut(self.review_point).init(record.review_point);
    }

    // ── accessors ────────────────────────────────────────────────────────

    fn read<T: FieldValue>(&self, key: FieldKey<T>) -> T {
        self.set
            .get(key)
            .expect("book fields are created in Book::new")
            .value()
    }

    fn field_mut<T: FieldValue>(&mut self, key: FieldKey<T>) -> FieldMut<'_, Field<T>> {
        self.set
            .get_mut(key)
            .expect("book fields are created in Book::new")
    }

    pub fn id(&self) -> u32 {
        self.read(self.id)
    }

    pub fn title(&self) -> Option<String> {
        self.read(self.title)
    }

    pub fn author(&self) -> Option<String> {
        self.read(self.author)
    }

    pub fn publisher(&self) -> Option<String> {
        self.read(self.publisher)
    }

    pub fn category(&self) -> Option<BookCategory> {
        self.read(self.category)
    }

    pub fn price(&self) -> Option<i64> {
        self.read(self.price)
    }

    pub fn purchase_date(&self) -> Option<NaiveDate> {
        self.read(self.purchase_date)
    }

    pub fn review_point(&self) -> Option<i32> {
        self.read(self.review_point)
    }

    // ── setters ──────────────────────────────────────────────────────────

    pub fn set_title(&mut self, title: Option<String>) -> FormkitResult<WriteOutcome> {
        Ok(self.field_mut(self.title).set_value(title)?)
    }

    pub fn set_author(&mut self, author: Option<String>) -> FormkitResult<WriteOutcome> {
        Ok(self.field_mut(self.author).set_value(author)?)
    }

    pub fn set_publisher(&mut self, publisher: Option<String>) -> FormkitResult<WriteOutcome> {
        Ok(self.field_mut(self.publisher).set_value(publisher)?)
    }

    pub fn set_category(&mut self, category: Option<BookCategory>) -> FormkitResult<WriteOutcome> {
        Ok(self.field_mut(self.category).set_value(category)?)
    }

    pub fn set_price(&mut self, price: Option<i64>) -> FormkitResult<WriteOutcome> {
        Ok(self.field_mut(self.price).set_value(price)?)
    }

    pub fn set_purchase_date(&mut self, date: Option<NaiveDate>) -> FormkitResult<WriteOutcome> {
        Ok(self.field_mut(self.purchase_date).set_value(date)?)
    }

    pub fn set_review_point(&mut self, point: Option<i32>) -> FormkitResult<WriteOutcome> {
        Ok(self.field_mut(self.review_point).set_value(point)?)
    }

    /// Assign the identifier after the book has been stored. Bypasses
    /// validation and leaves the field clean.
    pub fn init_id(&mut self, id: u32) {
        self.field_mut(self.id).init(id);
    }

    /// Parse `text` for the named field and write it through that field's
    /// mutation protocol. Blank text clears the field.
    ///
    /// Unparseable text is an [`AppError::InvalidInput`]; a parsed value the
    /// validator dislikes is recorded on the field, not returned as an error.
    #[instrument(skip(self, text), fields(id = self.id()))]
    pub fn assign(&mut self, name: &str, text: &str) -> FormkitResult<WriteOutcome> {
        debug!(field = name, "Assigning text");
        let blank = text.trim().is_empty();
        let some_text = (!blank).then(|| text.to_owned());

        let outcome = match name {
            names::ID => Err(FieldError::ReadOnly { name: name.into() }.into()),
            names::TITLE => self.set_title(some_text),
            names::AUTHOR => self.set_author(some_text),
            names::PUBLISHER => self.set_publisher(some_text),
            names::CATEGORY => {
                let category = parse_blank(name, text, |s| s.parse::<BookCategory>())?;
                self.set_category(category)
            }
            names::PRICE => {
                let price = parse_blank(name, text, |s| s.replace(',', "").parse::<i64>())?;
                self.set_price(price)
            }
            names::PURCHASE_DATE => {
                let date = parse_blank(name, text, parse_date)?;
                self.set_purchase_date(date)
            }
            names::REVIEW_POINT => {
                let point = parse_blank(name, text, |s| s.parse::<i32>())?;
                self.set_review_point(point)
            }
            other => Err(FieldError::NotFound { name: other.into() }.into()),
        };

        if let Ok(WriteOutcome::Rejected) = outcome {
            warn!(field = name, error = ?self.set.error_for(name), "Value rejected");
        }
        outcome
    }

    /// Copy every writable value from `other` through the normal write path.
    pub fn copy_from(&mut self, other: &Book) -> FormkitResult<()> {
        self.set
            .set_values_where(other.set.iter(), |f| !f.is_read_only())?;
        Ok(())
    }

    pub fn record(&self) -> BookRecord {
        BookRecord {
            id: self.id(),
            title: self.title(),
            author: self.author(),
            publisher: self.publisher(),
            category: self.category(),
            price: self.price(),
            purchase_date: self.purchase_date(),
            review_point: self.review_point(),
        }
    }

    /// An independent copy with the current values as its baseline.
    pub fn detached(&self) -> Self {
        Self {
            set: self.set.detached(),
            ..*self
        }
    }

    /// The bundled sample library.
    pub fn samples() -> Vec<Book> {
        use BookCategory::{Comic, Nonfiction, Novel};

        #[rustfmt::skip]
        let rows = [
            (1, "Dogra Magra", "Yumeno Kyusaku", "San-ichi Shobo", Novel, 1200, (2014, 1, 10), 5),
            (2, "Kokushikan Satsujin Jiken", "Oguri Mushitaro", "Shakai Shisosha", Novel, 800, (2014, 2, 12), 3),
            (3, "Kyomu e no Kumotsu", "Nakai Hideo", "Kodansha", Novel, 500, (2014, 3, 7), 4),
            (4, "Koto no Oni", "Edogawa Ranpo", "Kodansha", Novel, 250, (2014, 5, 20), 3),
            (5, "Mato", "Hisao Juran", "San-ichi Shobo", Novel, 950, (2014, 6, 10), 4),
            (6, "The Vanishing Hitchhiker", "J. H. Brunvand", "Shinjuku Shobo", Nonfiction, 1200, (2014, 7, 21), 4),
            (7, "Media Rape", "Wilson Bryan Key", "Libroport", Nonfiction, 105, (2014, 7, 21), 4),
            (8, "Majo", "Igarashi Daisuke", "Shogakukan", Comic, 330, (2014, 8, 2), 4),
            (9, "Sarusuberi", "Sugiura Hinako", "Chikuma Shobo", Comic, 550, (2014, 9, 10), 4),
            (10, "Negative", "Itagaki Nobuo", "Seirindo", Comic, 250, (2014, 9, 10), 4),
        ];

        rows.into_iter()
            .map(|(id, title, author, publisher, category, price, (y, m, d), review)| {
                Book::from_record(&BookRecord {
                    id,
                    title: Some(title.into()),
                    author: Some(author.into()),
                    publisher: Some(publisher.into()),
                    category: Some(category),
                    price: Some(price),
                    purchase_date: NaiveDate::from_ymd_opt(y, m, d),
                    review_point: Some(review),
                })
            })
            .collect()
    }
}

fn parse_blank<T, E: fmt::Display>(
    field: &str,
    text: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> FormkitResult<Option<T>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    parse(text).map(Some).map_err(|e| {
        warn!(field, text, "Unparseable input");
        AppError::InvalidInput {
            field: field.to_owned(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn parse_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y/%m/%d"))
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for Book {
    fn fields(&self) -> &FieldSet {
        &self.set
    }

    fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.set
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.title().unwrap_or_default(),
            self.author().unwrap_or_default()
        )
    }
}

impl fmt::Debug for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Book")
            .field("record", &self.record())
            .field("is_changed", &self.is_changed())
            .field("has_error", &self.has_error())
            .finish()
    }
}
