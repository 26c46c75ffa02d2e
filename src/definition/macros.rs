//! Macros for compact machine declarations.

/// Declare a list of states in a compact literal form.
///
/// Expands to a `Vec<StateDecl>` in declaration order, so the first state
/// listed is the machine's initial state.
///
/// # Example
///
/// ```
/// use flowstate::{create_machine, states};
///
/// let machine = create_machine("editor", || {
///     states! {
///         idle { EDIT => editing },
///         editing { SAVE => saving },
///         saving (clear_on_exit = true) {
///             SUCCESS => idle,
///             FAILURE => editing,
///         },
///     }
/// })
/// .unwrap();
///
/// assert_eq!(machine.current(), "idle");
/// assert!(machine.can("saving", "FAILURE"));
/// ```
#[macro_export]
macro_rules! states {
    (
        $(
            $state:ident $( (clear_on_exit = $clear:expr) )? {
                $( $event:ident => $target:ident ),* $(,)?
            }
        ),* $(,)?
    ) => {
        vec![
            $(
                {
                    #[allow(unused_mut)]
                    let mut decl = $crate::definition::StateDecl::new(stringify!($state));
                    $( decl = decl.on(stringify!($event), stringify!($target)); )*
                    $( decl = decl.clear_on_exit($clear); )?
                    decl
                }
            ),*
        ]
    };
}
