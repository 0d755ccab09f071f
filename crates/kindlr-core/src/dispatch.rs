//! View dispatch: pick the renderer for a kind and an optional variant key.
//!
//! The table is generic over the renderer type so the core crate stays free
//! of any rendering dependency. The web crate plugs in plain function
//! pointers.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::kinds::{KindRegistry, KindVariantRegistration, Variant};

/// Outcome of resolving a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch<'a, R> {
    /// A specialized renderer exists for the kind.
    Specialized { variant: Variant, render: &'a R },
    /// The kind has no specialized renderers; use the generic field view.
    Fallback,
    /// The requested variant key is unknown or not declared for the kind.
    Unavailable,
}

/// Lookup from `(kind, variant)` to a renderer.
#[derive(Debug, Clone)]
pub struct ViewTable<R> {
    registrations: HashMap<u16, KindVariantRegistration>,
    renderers: HashMap<(u16, Variant), R>,
}

impl<R> ViewTable<R> {
    /// Build a table for every registration in `registry`.
    ///
    /// Renderers for undeclared `(kind, variant)` pairs are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRenderer`] if a declared variant has no
    /// renderer.
    pub fn new(
        registry: &KindRegistry,
        renderers: impl IntoIterator<Item = ((u16, Variant), R)>,
    ) -> Result<Self> {
        let mut supplied: HashMap<(u16, Variant), R> = renderers.into_iter().collect();
        let mut table = HashMap::new();
        let mut registrations = HashMap::new();

        for registration in registry.registrations() {
            let kind = registration.kind();
            for &variant in registration.variants() {
                let render = supplied
                    .remove(&(kind, variant))
                    .ok_or(Error::MissingRenderer {
                        kind,
                        variant: variant.as_str(),
                    })?;
                table.insert((kind, variant), render);
            }
            registrations.insert(kind, registration.clone());
        }

        for (kind, variant) in supplied.keys() {
            tracing::warn!(kind, variant = %variant, "Ignoring renderer for undeclared variant");
        }

        Ok(Self {
            registrations,
            renderers: table,
        })
    }

    /// Resolve the renderer for `kind`.
    ///
    /// Without a requested key the default variant is used, or the first
    /// declared one when there is no default.
    pub fn resolve(&self, kind: u16, requested: Option<&str>) -> Dispatch<'_, R> {
        let Some(registration) = self.registrations.get(&kind) else {
            return Dispatch::Fallback;
        };

        let variant = match requested {
            Some(key) => match key.parse::<Variant>() {
                Ok(variant) if registration.variants().contains(&variant) => variant,
                _ => return Dispatch::Unavailable,
            },
            None => match registration
                .default_variant()
                .or_else(|| registration.variants().first().copied())
            {
                Some(variant) => variant,
                None => return Dispatch::Fallback,
            },
        };

        match self.renderers.get(&(kind, variant)) {
            Some(render) => Dispatch::Specialized { variant, render },
            None => Dispatch::Unavailable,
        }
    }

    /// All renderers for `kind` in declared order.
    pub fn variants_of(&self, kind: u16) -> Vec<(Variant, &R)> {
        let Some(registration) = self.registrations.get(&kind) else {
            return Vec::new();
        };
        registration
            .variants()
            .iter()
            .filter_map(|&variant| {
                self.renderers
                    .get(&(kind, variant))
                    .map(|render| (variant, render))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::KIND_TABLE;

    fn all_builtin() -> Vec<((u16, Variant), &'static str)> {
        vec![
            ((0, Variant::Full), "profile-full"),
            ((0, Variant::Compact), "profile-compact"),
            ((1, Variant::Full), "note-full"),
            ((1, Variant::Compact), "note-compact"),
            ((3, Variant::Full), "follows-full"),
            ((3, Variant::Compact), "follows-compact"),
        ]
    }

    fn table() -> ViewTable<&'static str> {
        ViewTable::new(&KindRegistry::builtin().unwrap(), all_builtin()).unwrap()
    }

    #[test]
    fn test_default_variant_is_used_without_request() {
        let table = table();
        assert_eq!(
            table.resolve(0, None),
            Dispatch::Specialized {
                variant: Variant::Full,
                render: &"profile-full"
            }
        );
        assert_eq!(
            table.resolve(1, None),
            Dispatch::Specialized {
                variant: Variant::Compact,
                render: &"note-compact"
            }
        );
    }

    #[test]
    fn test_requested_variant() {
        let table = table();
        assert_eq!(
            table.resolve(3, Some("full")),
            Dispatch::Specialized {
                variant: Variant::Full,
                render: &"follows-full"
            }
        );
    }

    #[test]
    fn test_unknown_variant_key_is_unavailable() {
        assert_eq!(table().resolve(1, Some("wide")), Dispatch::Unavailable);
        assert_eq!(table().resolve(1, Some("")), Dispatch::Unavailable);
    }

    #[test]
    fn test_unregistered_kind_falls_back() {
        let table = table();
        assert_eq!(table.resolve(7, None), Dispatch::Fallback);
        assert_eq!(table.resolve(7, Some("full")), Dispatch::Fallback);
        assert_eq!(table.resolve(65535, None), Dispatch::Fallback);
    }

    #[test]
    fn test_undeclared_variant_is_unavailable() {
        let registry = KindRegistry::new(
            KIND_TABLE.iter().copied(),
            [KindVariantRegistration::new(1, vec![Variant::Compact], None).unwrap()],
        )
        .unwrap();
        let table = ViewTable::new(&registry, [((1, Variant::Compact), "compact")]).unwrap();

        assert_eq!(table.resolve(1, Some("full")), Dispatch::Unavailable);
        // No default: first declared variant
        assert_eq!(
            table.resolve(1, None),
            Dispatch::Specialized {
                variant: Variant::Compact,
                render: &"compact"
            }
        );
    }

    #[test]
    fn test_missing_renderer_is_rejected() {
        let registry = KindRegistry::builtin().unwrap();
        let mut renderers = all_builtin();
        renderers.retain(|((kind, variant), _)| !(*kind == 3 && *variant == Variant::Full));

        let err = ViewTable::new(&registry, renderers).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRenderer {
                kind: 3,
                variant: "full"
            }
        ));
    }

    #[test]
    fn test_extra_renderers_are_ignored() {
        let registry = KindRegistry::builtin().unwrap();
        let mut renderers = all_builtin();
        renderers.push(((7, Variant::Full), "reaction"));

        let table = ViewTable::new(&registry, renderers).unwrap();
        assert_eq!(table.resolve(7, None), Dispatch::Fallback);
    }

    #[test]
    fn test_variants_of_in_declared_order() {
        let table = table();
        let variants: Vec<Variant> = table.variants_of(0).into_iter().map(|(v, _)| v).collect();
        assert_eq!(variants, vec![Variant::Full, Variant::Compact]);
        assert!(table.variants_of(7).is_empty());
    }
}
