//! Observer seam between the tour core and presentation code.

use crate::core::Spot;

/// Notifications a presentation layer can subscribe to.
///
/// Every method has a default empty body, so an observer overrides only
/// what it renders: a marker highlighter cares about
/// [`on_spot_selected`](TourObserver::on_spot_selected), a progress chip
/// about [`on_progress_changed`](TourObserver::on_progress_changed), a
/// completion overlay about
/// [`on_tour_complete`](TourObserver::on_tour_complete).
///
/// The machine calls observers synchronously, in subscription order, on
/// the same thread that drove the operation. Observers must not call back
/// into the machine.
pub trait TourObserver {
    /// A spot was selected and is now current.
    fn on_spot_selected(&mut self, spot: &Spot) {
        let _ = spot;
    }

    /// The visited count changed (selection of a new spot, or a reset).
    fn on_progress_changed(&mut self, visited: usize, total: usize) {
        let _ = (visited, total);
    }

    /// The selection that just happened completed the tour.
    ///
    /// Fires exactly once per completion; resetting and completing again
    /// fires it again.
    fn on_tour_complete(&mut self) {}
}
