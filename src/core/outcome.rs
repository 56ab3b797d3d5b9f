//! Delivery outcomes and the digit rule table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest page number a flipped book can land on
pub const MAX_PAGE: u16 = 500;

/// Number of distinct page prefixes (page = prefix * 10 + digit)
pub const PAGE_PREFIX_COUNT: u16 = 50;

/// Classification of a single delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryCategory {
    /// Digits 1-6: that many runs off a legal ball
    Runs,
    /// Digit 7: legal ball, no runs
    Dot,
    /// Digit 8: one extra, ball not counted
    Wide,
    /// Digit 9: one extra, ball not counted, next delivery is a free hit
    NoBall,
    /// Digit 0: batter dismissed
    Out,
    /// Digit 0 on a free hit: dismissal forgiven
    Saved,
}

impl DeliveryCategory {
    /// Classify a digit. Only the last decimal digit is considered.
    pub fn for_digit(digit: u8, free_hit_active: bool) -> Self {
        match digit % 10 {
            1..=6 => DeliveryCategory::Runs,
            7 => DeliveryCategory::Dot,
            8 => DeliveryCategory::Wide,
            9 => DeliveryCategory::NoBall,
            _ if free_hit_active => DeliveryCategory::Saved,
            _ => DeliveryCategory::Out,
        }
    }

    /// Does this category use up one of the innings' legal balls?
    pub fn consumes_ball(self) -> bool {
        match self {
            DeliveryCategory::Runs
            | DeliveryCategory::Dot
            | DeliveryCategory::Out
            | DeliveryCategory::Saved => true,
            DeliveryCategory::Wide | DeliveryCategory::NoBall => false,
        }
    }

    /// Is this category an extra (wide or no-ball)?
    pub fn is_extra(self) -> bool {
        !self.consumes_ball()
    }
}

impl fmt::Display for DeliveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeliveryCategory::Runs => "RUNS",
            DeliveryCategory::Dot => "DOT",
            DeliveryCategory::Wide => "WIDE",
            DeliveryCategory::NoBall => "NOBALL",
            DeliveryCategory::Out => "OUT",
            DeliveryCategory::Saved => "SAVED",
        };
        f.write_str(s)
    }
}

/// A fully resolved delivery
///
/// Built only through [`DeliveryOutcome::from_page`], which derives every
/// field from the page number, so `page_number % 10 == last_digit` holds for
/// every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// Cosmetic page number (1-500)
    pub page_number: u16,
    /// Digit that decided the delivery
    pub last_digit: u8,
    /// Runs credited
    pub score_added: u32,
    /// 1 if a legal ball was used, else 0
    pub balls_added: u32,
    pub category: DeliveryCategory,
}

impl DeliveryOutcome {
    /// Resolve the delivery shown on a page
    pub fn from_page(page_number: u16, free_hit_active: bool) -> Self {
        let last_digit = (page_number % 10) as u8;
        let category = DeliveryCategory::for_digit(last_digit, free_hit_active);

        let score_added = match category {
            DeliveryCategory::Runs => last_digit as u32,
            DeliveryCategory::Wide | DeliveryCategory::NoBall => 1,
            DeliveryCategory::Dot | DeliveryCategory::Out | DeliveryCategory::Saved => 0,
        };
        let balls_added = u32::from(category.consumes_ball());

        DeliveryOutcome {
            page_number,
            last_digit,
            score_added,
            balls_added,
            category,
        }
    }

    /// Resolve a drawn digit and page prefix
    ///
    /// Page 0 does not exist in a book, so a zero result becomes page 500
    /// (which still ends in 0).
    pub fn from_draw(prefix: u16, digit: u8, free_hit_active: bool) -> Self {
        let mut page = (prefix % PAGE_PREFIX_COUNT) * 10 + u16::from(digit % 10);
        if page == 0 {
            page = MAX_PAGE;
        }
        Self::from_page(page, free_hit_active)
    }

    /// Banner text shown when the delivery lands
    pub fn message(&self) -> String {
        match self.category {
            DeliveryCategory::Runs => format!("{} RUNS", self.score_added),
            DeliveryCategory::Dot => "DOT BALL".to_string(),
            DeliveryCategory::Wide => "WIDE BALL".to_string(),
            DeliveryCategory::NoBall => "NO BALL".to_string(),
            DeliveryCategory::Saved => "SAVED BY FREEHIT".to_string(),
            DeliveryCategory::Out => "OUT!".to_string(),
        }
    }

    /// Is this a four or a six?
    pub fn is_boundary(&self) -> bool {
        self.category == DeliveryCategory::Runs && self.score_added >= 4
    }
}
