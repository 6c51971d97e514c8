//! Access control.
//!
//! Maps the current [`Session`] and a seat's owner to the set of permitted
//! actions, and decides how much of a seat each viewer may see.
//!
//! - Logged out: view only, without owner information.
//! - Administrator: everything, for any owner letter.
//! - Normal user: reserve for their own letter, cancel their own seats, see
//!   only whether a seat is free, taken, or theirs.

use thiserror::Error;

use crate::{
    seat::{Reservation, ReservationKind, Seat, UserLetter},
    session::{Identity, Session},
};

/// Why an action was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No one is logged in.
    #[error("log in first")]
    NotLoggedIn,

    /// Action reserved to the administrator.
    #[error("administrator privileges required")]
    AdminOnly,

    /// Normal user tried to cancel somebody else's seat.
    #[error("seat belongs to {owner}; you can only cancel your own reservations")]
    NotOwner {
        /// Holder of the seat
        owner: UserLetter,
    },

    /// Normal user tried to reserve on behalf of another letter.
    #[error("you can only reserve for yourself, not for {0:?}")]
    ForeignTarget(char),

    /// Target is not a letter `A`-`Z`.
    #[error("{0:?} is not a valid user letter (A-Z)")]
    InvalidTarget(char),

    /// Administrator reserved without naming a user letter.
    #[error("name the user letter to reserve for")]
    TargetRequired,
}

/// Permission to reserve, as resolved for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveGrant {
    /// Letter the seat will be held for.
    pub owner: UserLetter,
    /// Kind recorded on the seat.
    pub kind: ReservationKind,
}

/// How a seat appears to the current viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeatView {
    /// Free.
    Empty,
    /// Taken by someone the viewer may not identify.
    Reserved,
    /// Taken by the viewing user.
    Mine,
    /// Taken, with full detail (administrator view).
    Held {
        /// Holder of the seat
        owner: UserLetter,
        /// Who placed the reservation
        kind: ReservationKind,
    },
}

/// Identity of the logged-in actor.
pub fn require_login(session: &Session) -> Result<Identity, Denial> {
    session.identity().ok_or(Denial::NotLoggedIn)
}

/// Succeeds only for the administrator.
pub fn require_admin(session: &Session) -> Result<(), Denial> {
    match require_login(session)? {
        Identity::Admin => Ok(()),
        Identity::User(_) => Err(Denial::AdminOnly),
    }
}

/// Resolve who a reservation is for and what kind it is.
///
/// The administrator must name a target letter. A normal user reserves for
/// their own letter; naming it explicitly is allowed, naming any other is not.
pub fn authorize_reserve(session: &Session, target: Option<char>) -> Result<ReserveGrant, Denial> {
    match require_login(session)? {
        Identity::Admin => {
            let c = target.ok_or(Denial::TargetRequired)?;
            let owner = UserLetter::new(c).ok_or(Denial::InvalidTarget(c))?;
            Ok(ReserveGrant { owner, kind: ReservationKind::ByAdmin })
        },
        Identity::User(me) => {
            if let Some(c) = target {
                let requested = UserLetter::new(c).ok_or(Denial::InvalidTarget(c))?;
                if requested != me {
                    return Err(Denial::ForeignTarget(c));
                }
            }
            Ok(ReserveGrant { owner: me, kind: ReservationKind::BySelf })
        },
    }
}

/// Check that the session may cancel `reservation`.
pub fn authorize_cancel(session: &Session, reservation: &Reservation) -> Result<(), Denial> {
    match require_login(session)? {
        Identity::Admin => Ok(()),
        Identity::User(me) if me == reservation.owner => Ok(()),
        Identity::User(_) => Err(Denial::NotOwner { owner: reservation.owner }),
    }
}

/// Project a seat for the current viewer.
pub fn seat_view(session: &Session, seat: &Seat) -> SeatView {
    let Some(reservation) = seat.reservation() else {
        return SeatView::Empty;
    };

    match session.identity() {
        Some(Identity::Admin) => {
            SeatView::Held { owner: reservation.owner, kind: reservation.kind }
        },
        Some(Identity::User(me)) if me == reservation.owner => SeatView::Mine,
        Some(Identity::User(_)) | None => SeatView::Reserved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> UserLetter {
        UserLetter::new(c).unwrap()
    }

    fn user(c: char) -> Session {
        Session::logged_in(Identity::User(letter(c)))
    }

    fn admin() -> Session {
        Session::logged_in(Identity::Admin)
    }

    fn held_by(c: char) -> Reservation {
        Reservation { kind: ReservationKind::BySelf, owner: letter(c), reserved_at: 1 }
    }

    #[test]
    fn logged_out_may_not_mutate() {
        let session = Session::new();
        assert_eq!(authorize_reserve(&session, Some('A')), Err(Denial::NotLoggedIn));
        assert_eq!(authorize_cancel(&session, &held_by('A')), Err(Denial::NotLoggedIn));
        assert_eq!(require_admin(&session), Err(Denial::NotLoggedIn));
    }

    #[test]
    fn admin_reserves_for_any_letter() {
        let grant = authorize_reserve(&admin(), Some('q')).unwrap();
        assert_eq!(grant, ReserveGrant { owner: letter('Q'), kind: ReservationKind::ByAdmin });

        assert_eq!(authorize_reserve(&admin(), None), Err(Denial::TargetRequired));
        assert_eq!(authorize_reserve(&admin(), Some('7')), Err(Denial::InvalidTarget('7')));
    }

    #[test]
    fn user_reserves_only_for_self() {
        let expected = ReserveGrant { owner: letter('B'), kind: ReservationKind::BySelf };
        assert_eq!(authorize_reserve(&user('B'), None), Ok(expected));
        assert_eq!(authorize_reserve(&user('B'), Some('b')), Ok(expected));
        assert_eq!(authorize_reserve(&user('B'), Some('C')), Err(Denial::ForeignTarget('C')));
    }

    #[test]
    fn cancel_follows_ownership() {
        assert_eq!(authorize_cancel(&user('B'), &held_by('B')), Ok(()));
        assert_eq!(
            authorize_cancel(&user('B'), &held_by('C')),
            Err(Denial::NotOwner { owner: letter('C') })
        );
        assert_eq!(authorize_cancel(&admin(), &held_by('C')), Ok(()));
    }

    #[test]
    fn admin_only_actions() {
        assert_eq!(require_admin(&admin()), Ok(()));
        assert_eq!(require_admin(&user('A')), Err(Denial::AdminOnly));
    }

    #[test]
    fn views_hide_other_owners() {
        let seat = Seat::Reserved(held_by('C'));

        assert_eq!(seat_view(&Session::new(), &seat), SeatView::Reserved);
        assert_eq!(seat_view(&user('B'), &seat), SeatView::Reserved);
        assert_eq!(seat_view(&user('C'), &seat), SeatView::Mine);
        assert_eq!(
            seat_view(&admin(), &seat),
            SeatView::Held { owner: letter('C'), kind: ReservationKind::BySelf }
        );
        assert_eq!(seat_view(&admin(), &Seat::Empty), SeatView::Empty);
    }
}
