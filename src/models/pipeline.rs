//! Filtering and multi-key ordering over listing sequences.
//!
//! Both operations accept owned listings or references (`&Listing`,
//! `Arc<Listing>`, ...) and never touch the listings themselves, only the
//! membership and order of the sequence.

use super::Listing;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Predicate deciding whether a listing is kept by [`filter`]
pub type Predicate<'a> = &'a dyn Fn(&Listing) -> bool;

/// "Strictly less" comparison used by [`MultiSorter`]
pub type LessFn<'a> = &'a dyn Fn(&Listing, &Listing) -> bool;

/// Returns the listings that satisfy every predicate, in their original order.
///
/// Predicates are evaluated in order and evaluation stops at the first one
/// that rejects a listing. With no predicates the result is a copy of the
/// input.
pub fn filter<L>(listings: &[L], predicates: &[Predicate<'_>]) -> Vec<L>
where
    L: Borrow<Listing> + Clone,
{
    listings
        .iter()
        .filter(|listing| {
            let listing: &Listing = Borrow::borrow(*listing);
            predicates.iter().all(|keep| keep(listing))
        })
        .cloned()
        .collect()
}

pub fn min_rooms(rooms: f64) -> impl Fn(&Listing) -> bool {
    move |l| l.rooms >= rooms
}

pub fn max_rooms(rooms: f64) -> impl Fn(&Listing) -> bool {
    move |l| l.rooms <= rooms
}

pub fn min_area(area: u32) -> impl Fn(&Listing) -> bool {
    move |l| l.area >= area
}

pub fn max_price(price: u32) -> impl Fn(&Listing) -> bool {
    move |l| l.price <= price
}

pub fn has_keyword(keyword: impl Into<String>) -> impl Fn(&Listing) -> bool {
    let keyword = keyword.into();
    move |l| l.keywords.iter().any(|k| *k == keyword)
}

pub fn by_price(a: &Listing, b: &Listing) -> bool {
    a.price < b.price
}

pub fn by_rooms(a: &Listing, b: &Listing) -> bool {
    a.rooms < b.rooms
}

pub fn by_area(a: &Listing, b: &Listing) -> bool {
    a.area < b.area
}

pub fn by_days_since_update(a: &Listing, b: &Listing) -> bool {
    a.days_since_update < b.days_since_update
}

/// Sorts listings by a chain of less functions, see [`ordered_by`].
pub struct MultiSorter<'a> {
    leading: Vec<LessFn<'a>>,
    last: LessFn<'a>,
}

/// Builds a sorter that compares with the given less functions, in order.
///
/// For every pair the leading functions are tried one by one; the first one
/// that tells the two listings apart decides. When all of them report a tie
/// the result of the last function is used as is, without checking it the
/// other way around.
///
/// # Panics
///
/// Panics if `less` is empty.
pub fn ordered_by<'a>(less: &[LessFn<'a>]) -> MultiSorter<'a> {
    let Some((last, leading)) = less.split_last() else {
        panic!("ordered_by needs at least one less function");
    };

    MultiSorter {
        leading: leading.to_vec(),
        last: *last,
    }
}

impl<'a> MultiSorter<'a> {
    /// Sorts `listings` in place.
    pub fn sort<L: Borrow<Listing>>(&self, listings: &mut [L]) {
        listings.sort_by(|p, q| self.compare(Borrow::borrow(p), Borrow::borrow(q)));
    }

    fn less(&self, p: &Listing, q: &Listing) -> bool {
        for less in &self.leading {
            if less(p, q) {
                return true;
            }
            if less(q, p) {
                return false;
            }
        }
        (self.last)(p, q)
    }

    fn compare(&self, p: &Listing, q: &Listing) -> Ordering {
        if self.less(p, q) {
            Ordering::Less
        } else if self.less(q, p) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}
