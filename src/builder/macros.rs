//! Macros for declaring tour catalogs.

/// Declare a [`SpotCatalog`](crate::core::SpotCatalog) literal.
///
/// Each entry is `name => description, image_ref, (x, y, z)`; ids are
/// assigned from top to bottom.
///
/// # Example
///
/// ```
/// use guidepost::spot_catalog;
///
/// let catalog = spot_catalog! {
///     "Main Entrance" => "Visitors arrive here.", "#img-gate", (0.0, 0.0, -2.0),
///     "Library" => "Quiet study spaces.", "#img-library", (-2.0, 0.0, -3.0),
/// };
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get(1).unwrap().name, "Library");
/// ```
#[macro_export]
macro_rules! spot_catalog {
    (
        $(
            $name:literal => $description:literal, $image_ref:literal, ($x:expr, $y:expr, $z:expr)
        ),* $(,)?
    ) => {
        $crate::core::SpotCatalog::new(vec![
            $(
                $crate::core::Spot::new($name, $description, $image_ref, ($x, $y, $z))
            ),*
        ])
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn spot_catalog_macro_assigns_ids_in_order() {
        let catalog = spot_catalog! {
            "Gate" => "The main gate.", "#img-gate", (0.0, 0.0, -2.0),
            "Cafeteria" => "Food and meetups.", "#img-cafe", (2.0, 0.0, -3.0),
            "Library" => "Quiet study spaces.", "#img-library", (-2.0, 0.0, -3.0),
        };

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(0).unwrap().id, 0);
        assert_eq!(catalog.get(2).unwrap().name, "Library");
        assert_eq!(catalog.get(1).unwrap().position.x, 2.0);
    }

    #[test]
    fn trailing_comma_is_optional() {
        let catalog = spot_catalog! {
            "Gate" => "The main gate.", "#img-gate", (0.0, 0.0, -2.0)
        };
        assert_eq!(catalog.len(), 1);
    }
}
