use crate::ImageMetaData;

/// Split a flat image buffer into its planes using the metadata's steps and plane heights.
///
/// Yields every plane with its associated row step. Plane N starts directly after the last row
/// of plane N-1.
///
/// # Panics
///
/// If `buf` is too small for the planes described by `meta` the iterator will panic
pub(crate) fn split_planes<'m, S: AnySlice + 'm>(
    meta: &'m ImageMetaData,
    buf: S,
) -> impl Iterator<Item = (S, usize)> + 'm {
    PlaneSplit {
        meta,
        rest: buf,
        plane: 0,
    }
}

struct PlaneSplit<'m, S> {
    meta: &'m ImageMetaData,
    rest: S,
    plane: usize,
}

impl<S: AnySlice> Iterator for PlaneSplit<'_, S> {
    type Item = (S, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let step = *self.meta.steps().get(self.plane)?;
        let split_at = self.meta.plane_len(self.plane);

        let (plane, rest) = std::mem::take(&mut self.rest).slice_split_at(split_at);

        self.rest = rest;
        self.plane += 1;

        Some((plane, step))
    }
}

/// Take the first `N` planes out of `iter`, `None` if it yields less than `N`
pub(crate) fn read_planes<S: AnySlice, const N: usize>(
    mut iter: impl Iterator<Item = (S, usize)>,
) -> Option<[(S, usize); N]> {
    let mut out: [(S, usize); N] = std::array::from_fn(|_| (S::default(), 0));

    for out in out.iter_mut() {
        *out = iter.next()?;
    }

    Some(out)
}

/// Helper trait implemented on &[T] and &mut [T]
#[diagnostic::on_unimplemented(message = "AnySlice is only implemented for &[T] and &mut [T].\n\
               When using or Vec<T> or similar try .as_slice() or .as_mut_slice()")]
pub trait AnySlice: sealed::Sealed + Default + Sized {
    fn slice_len(&self) -> usize;
    fn slice_split_at(self, at: usize) -> (Self, Self);
}

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for &[T] {}
    impl<T> Sealed for &mut [T] {}
}

impl<T> AnySlice for &[T] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at(at)
    }
}

impl<T> AnySlice for &mut [T] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at_mut(at)
    }
}
