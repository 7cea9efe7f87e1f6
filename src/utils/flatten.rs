//! Flattening of arbitrarily nested lists.

/// A value or a list of nested values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

/// Build a [`Nested`] list from literal items and sublists.
///
/// ```rust
/// use mlutilz::nested;
/// use mlutilz::utils::flatten_list;
///
/// let value = nested![1, 2, 3, [4], [], [[[[5]]]]];
/// let flat: Vec<i32> = flatten_list(&value).copied().collect();
/// assert_eq!(flat, vec![1, 2, 3, 4, 5]);
/// ```
#[macro_export]
macro_rules! nested {
    (@item [$($inner:tt)*]) => { $crate::nested![$($inner)*] };
    (@item $value:expr) => { $crate::utils::Nested::Item($value) };
    ($($item:tt),* $(,)?) => {
        $crate::utils::Nested::List(vec![$($crate::nested!(@item $item)),*])
    };
}

/// Iterate over every leaf of `nested` in order.
///
/// Walks with an explicit stack, so deep nesting cannot overflow the call
/// stack. The input is left untouched.
pub fn flatten_list<T>(nested: &Nested<T>) -> impl Iterator<Item = &T> {
    let mut stack: Vec<std::slice::Iter<'_, Nested<T>>> = Vec::new();
    let mut single = match nested {
        Nested::Item(value) => Some(value),
        Nested::List(items) => {
            stack.push(items.iter());
            None
        }
    };

    std::iter::from_fn(move || {
        if let Some(value) = single.take() {
            return Some(value);
        }
        while let Some(top) = stack.last_mut() {
            match top.next() {
                Some(Nested::Item(value)) => return Some(value),
                Some(Nested::List(items)) => stack.push(items.iter()),
                None => {
                    stack.pop();
                }
            }
        }
        None
    })
}

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Wrap a scalar into a one-element list, pass lists and `None` through.
pub fn always_return_list<T>(value: Option<OneOrMany<T>>) -> Option<Vec<T>> {
    value.map(|value| match value {
        OneOrMany::One(item) => vec![item],
        OneOrMany::Many(items) => items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_mixed_depths() {
        let value = crate::nested![1, 2, 3, [4], [], [[[[5]]]]];
        let flat: Vec<i32> = flatten_list(&value).copied().collect();
        assert_eq!(flat, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_flatten_keeps_input() {
        let value = crate::nested![["a", "b"], "c"];
        let first: Vec<_> = flatten_list(&value).collect();
        let second: Vec<_> = flatten_list(&value).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![&"a", &"b", &"c"]);
    }

    #[test]
    fn test_flatten_single_item() {
        let value = Nested::Item(7);
        assert_eq!(flatten_list(&value).collect::<Vec<_>>(), vec![&7]);
    }

    #[test]
    fn test_flatten_deep_nesting() {
        let mut value = Nested::Item(0u8);
        for _ in 0..100_000 {
            value = Nested::List(vec![value]);
        }
        assert_eq!(flatten_list(&value).count(), 1);
        // Dropping a chain this deep recurses, so unwind it by hand.
        while let Nested::List(mut items) = value {
            value = items.pop().unwrap_or(Nested::Item(0));
        }
    }

    #[test]
    fn test_always_return_list() {
        assert_eq!(always_return_list::<i32>(None), None);
        assert_eq!(always_return_list(Some(OneOrMany::One(3))), Some(vec![3]));
        assert_eq!(
            always_return_list(Some(OneOrMany::Many(vec![1, 2]))),
            Some(vec![1, 2])
        );
    }
}
