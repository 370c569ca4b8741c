//! Macros for ergonomic state machine construction.

/// Generate a state kind enum and its `StateKind` implementation.
///
/// # Example
///
/// ```
/// use hookstate::state_enum;
/// use hookstate::core::StateKind;
///
/// state_enum! {
///     pub enum HunterState {
///         Rotation,
///         MoveForward,
///         End,
///     }
///     final: [End]
/// }
///
/// assert_eq!(HunterState::MoveForward.name(), "MoveForward");
/// assert!(HunterState::End.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateKind for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
