//! Seat records and user letters.
//!
//! A seat is either [`Seat::Empty`] or carries a [`Reservation`]. Owner and
//! timestamp live inside the reservation, so an empty seat can never carry a
//! stale owner or time.

use std::fmt;

/// Identity of a normal user: a single upper-case ASCII letter `A`-`Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserLetter(u8);

impl UserLetter {
    /// Build from a character, folding lower case to upper case.
    ///
    /// Returns `None` for anything outside `a`-`z` / `A`-`Z`.
    pub fn new(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Self(upper as u8))
    }

    /// Build from an ASCII byte as stored in a snapshot record.
    ///
    /// Unlike [`Self::new`], no case folding happens: only `b'A'..=b'Z'` is
    /// accepted.
    pub fn from_byte(byte: u8) -> Option<Self> {
        byte.is_ascii_uppercase().then_some(Self(byte))
    }

    /// The letter as a `char`.
    pub fn as_char(self) -> char {
        char::from(self.0)
    }

    /// The letter as its ASCII byte.
    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl fmt::Display for UserLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Who placed a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationKind {
    /// Placed by the administrator on behalf of a user letter.
    ByAdmin,
    /// Placed by a normal user for their own letter.
    BySelf,
}

/// An occupied seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reservation {
    /// Who placed it.
    pub kind: ReservationKind,
    /// Letter the seat is held for.
    pub owner: UserLetter,
    /// Unix seconds at which the reservation was made.
    pub reserved_at: i64,
}

/// Flat status of a seat, mirroring the three values of the snapshot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeatStatus {
    /// Free.
    Empty,
    /// Reserved by the administrator.
    ReservedByAdmin,
    /// Reserved by the owning user.
    ReservedBySelf,
}

/// A single seat on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Seat {
    /// Free.
    #[default]
    Empty,
    /// Held by someone.
    Reserved(Reservation),
}

impl Seat {
    /// Flat status view.
    pub fn status(&self) -> SeatStatus {
        match self {
            Self::Empty => SeatStatus::Empty,
            Self::Reserved(r) => match r.kind {
                ReservationKind::ByAdmin => SeatStatus::ReservedByAdmin,
                ReservationKind::BySelf => SeatStatus::ReservedBySelf,
            },
        }
    }

    /// Owner letter. `None` iff the seat is empty.
    pub fn owner(&self) -> Option<UserLetter> {
        self.reservation().map(|r| r.owner)
    }

    /// Reservation time. `None` iff the seat is empty.
    pub fn reserved_at(&self) -> Option<i64> {
        self.reservation().map(|r| r.reserved_at)
    }

    /// The reservation, if any.
    pub fn reservation(&self) -> Option<&Reservation> {
        match self {
            Self::Empty => None,
            Self::Reserved(r) => Some(r),
        }
    }

    /// True when the seat is free.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_fold_to_upper_case() {
        assert_eq!(UserLetter::new('b').map(UserLetter::as_char), Some('B'));
        assert_eq!(UserLetter::new('Z').map(UserLetter::as_char), Some('Z'));
        assert_eq!(UserLetter::new('1'), None);
        assert_eq!(UserLetter::new('é'), None);
    }

    #[test]
    fn stored_bytes_are_not_folded() {
        assert!(UserLetter::from_byte(b'Q').is_some());
        assert_eq!(UserLetter::from_byte(b'q'), None);
        assert_eq!(UserLetter::from_byte(0), None);
    }

    #[test]
    fn accessors_agree_with_status() {
        let owner = UserLetter::new('C').unwrap();
        let seat =
            Seat::Reserved(Reservation { kind: ReservationKind::BySelf, owner, reserved_at: 7 });

        assert_eq!(seat.status(), SeatStatus::ReservedBySelf);
        assert_eq!(seat.owner(), Some(owner));
        assert_eq!(seat.reserved_at(), Some(7));

        assert_eq!(Seat::Empty.status(), SeatStatus::Empty);
        assert_eq!(Seat::Empty.owner(), None);
        assert_eq!(Seat::Empty.reserved_at(), None);
    }
}
