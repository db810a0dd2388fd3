//! Device materialization
//!
//! Two operating modes, selected by iterator category:
//!
//! 1. **Allocate-and-copy** ([`materialize_permutation`]): only the
//!    composite permutation category needs it. The element and index
//!    sub-ranges get one device buffer each, sized from their own extents:
//!    the two sub-ranges can have different lengths and different element
//!    types, so sharing a size between them would over- or under-allocate
//!    one of them.
//! 2. **Wrap-existing** ([`RebindDevice`] / [`create_device_itr`]): every
//!    other category either already lives on the device or computes its
//!    values lazily; staging is a pass-through or a rebind and allocates
//!    nothing.

use crate::error::Result;
use crate::executor::Executor;
use crate::iter::{
    Categorized, ConstantIterator, CountingIterator, CountingValue, IndexValue, PermutationIterator,
    TransformIterator,
};
use crate::vector::{DeviceVector, DeviceVectorIter};
use std::sync::Arc;
use std::time::Instant;

/// Materialize a host permutation range into a device permutation iterator
///
/// Allocates one device buffer per sub-range, each constructed directly
/// over the corresponding host memory, wraps both in device-resident
/// containers, and composes a device permutation iterator over their
/// begin cursors. The containers are heap-owned behind the returned
/// cursors, so the iterator keeps them alive.
///
/// Empty sub-ranges allocate genuine zero-size buffers; no sentinel
/// element is inserted.
#[tracing::instrument(skip(exec, range), fields(
    elements = range.element_iter().len(),
    indices = range.index_iter().len()
))]
pub fn materialize_permutation<'e, 'i, T, I>(
    exec: &Executor,
    range: &PermutationIterator<&'e [T], &'i [I]>,
) -> Result<PermutationIterator<DeviceVectorIter<T>, DeviceVectorIter<I>>>
where
    T: bytemuck::Pod,
    I: bytemuck::Pod + IndexValue,
{
    let start = Instant::now();

    // Extents are computed independently: element extent from the element
    // sub-range, index extent from the composite's own logical length.
    let elements = Arc::new(DeviceVector::from_host(exec, range.element_iter())?);
    let indices = Arc::new(DeviceVector::from_host(exec, range.index_iter())?);

    let duration_us = start.elapsed().as_micros() as u64;
    tracing::debug!(
        duration_us = duration_us,
        element_bytes = elements.size_bytes(),
        index_bytes = indices.size_bytes(),
        "permutation_materialized"
    );

    Ok(PermutationIterator::new(
        DeviceVector::begin(&elements),
        DeviceVector::begin(&indices),
    ))
}

/// Closed `create_device_itr` family
///
/// Rebinds a host iterator onto device-ready sub-iterator(s) `D`,
/// preserving its logical shape. One impl per category; an iterator type
/// outside the set fails to build. The constant and counting impls ignore
/// the supplied hint and never touch the backend — those categories carry
/// no addressable storage, so there is nothing to move to the device.
pub trait RebindDevice<D>: Categorized {
    /// The resulting device-side iterator
    type Output;

    /// Produce the device-side iterator for this host iterator
    fn create_device_itr(&self, dev: D) -> Self::Output;
}

/// Produce the device-side iterator for `host`, given device hint(s) `dev`
pub fn create_device_itr<H, D>(host: &H, dev: D) -> H::Output
where
    H: RebindDevice<D>,
{
    host.create_device_itr(dev)
}

// Random access: the caller already produced the correct device iterator;
// pass it through unchanged for uniformity of call sites.
impl<'a, T, D> RebindDevice<D> for &'a [T] {
    type Output = D;

    fn create_device_itr(&self, dev: D) -> D {
        dev
    }
}

// Transform: rebind the same function onto the supplied device base.
impl<F: Clone, I, D> RebindDevice<D> for TransformIterator<F, I> {
    type Output = TransformIterator<F, D>;

    fn create_device_itr(&self, dev: D) -> TransformIterator<F, D> {
        self.rebind(dev)
    }
}

// Constant/counting: strictly allocation-free identity.
impl<T: Copy, D> RebindDevice<D> for ConstantIterator<T> {
    type Output = ConstantIterator<T>;

    fn create_device_itr(&self, _dev: D) -> ConstantIterator<T> {
        *self
    }
}

impl<T: CountingValue, D> RebindDevice<D> for CountingIterator<T> {
    type Output = CountingIterator<T>;

    fn create_device_itr(&self, _dev: D) -> CountingIterator<T> {
        *self
    }
}

// Permutation: compose the supplied device sub-iterators into a composite
// of the same arity.
impl<E1, I1, E2, I2> RebindDevice<(E2, I2)> for PermutationIterator<E1, I1> {
    type Output = PermutationIterator<E2, I2>;

    fn create_device_itr(&self, dev: (E2, I2)) -> PermutationIterator<E2, I2> {
        let (elements, indices) = dev;
        PermutationIterator::new(elements, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_independent_extents() {
        let exec = Executor::new().unwrap();

        // M = 10 elements, N = 3 indices
        let elements: Vec<f32> = (0..10).map(|i| i as f32 * 1.5).collect();
        let indices = [3u32, 1, 4];
        let host = PermutationIterator::new(&elements[..], &indices[..]);

        let dev = materialize_permutation(&exec, &host).unwrap();
        assert_eq!(dev.element_iter().vector().size_bytes(), 40);
        assert_eq!(dev.index_iter().vector().size_bytes(), 12);
        assert_eq!(dev.len(), 3);

        // Traversal honors the index sequence
        assert_eq!(dev.value_at(0).unwrap(), 4.5);
        assert_eq!(dev.value_at(1).unwrap(), 1.5);
        assert_eq!(dev.value_at(2).unwrap(), 6.0);
    }

    #[test]
    fn test_materialize_empty_ranges() {
        let exec = Executor::new().unwrap();

        let elements: [f32; 0] = [];
        let indices: [u32; 0] = [];
        let host = PermutationIterator::new(&elements[..], &indices[..]);

        let dev = materialize_permutation(&exec, &host).unwrap();
        assert_eq!(dev.element_iter().vector().size_bytes(), 0);
        assert_eq!(dev.index_iter().vector().size_bytes(), 0);
        assert!(dev.is_empty());
    }

    #[test]
    fn test_rebind_random_access_pass_through() {
        let exec = Executor::new().unwrap();
        let data = [1i32, 2, 3, 4];
        let dv = Arc::new(DeviceVector::from_host(&exec, &data).unwrap());

        let host_range = &data[..];
        let staged = create_device_itr(&host_range, DeviceVector::begin(&dv));
        assert_eq!(staged.index(), 0);
        assert_eq!(staged.vector().to_vec().unwrap(), data.to_vec());
    }

    #[test]
    fn test_rebind_transform() {
        let exec = Executor::new().unwrap();
        let base = [1i32, 2, 3];
        let host = TransformIterator::new(&base[..], |x: &i32| x * 2);

        let dv = Arc::new(DeviceVector::from_host(&exec, &base).unwrap());
        let staged = create_device_itr(&host, DeviceVector::begin(&dv));

        assert_eq!(staged.category(), crate::iter::Category::Transform);
        assert_eq!((staged.functor())(&21), 42);
        assert_eq!(staged.base().vector().to_vec().unwrap(), base.to_vec());
    }

    #[test]
    fn test_rebind_constant_counting_no_allocation() {
        let exec = Executor::new().unwrap();
        let before = exec.allocation_count();

        let counting = CountingIterator::new(5i32);
        let staged = create_device_itr(&counting, ());
        assert_eq!(staged.value(), 5);

        let constant = ConstantIterator::new(7i64);
        let staged = create_device_itr(&constant, ());
        assert_eq!(staged.value(), 7);

        assert_eq!(exec.allocation_count(), before);
    }

    #[test]
    fn test_rebind_permutation_composes_pair() {
        let exec = Executor::new().unwrap();
        let elements = [10i32, 20, 30];
        let indices = [2u32, 0];
        let host = PermutationIterator::new(&elements[..], &indices[..]);

        let dev_e = Arc::new(DeviceVector::from_host(&exec, &elements).unwrap());
        let dev_i = Arc::new(DeviceVector::from_host(&exec, &indices).unwrap());

        let staged = create_device_itr(&host, (DeviceVector::begin(&dev_e), DeviceVector::begin(&dev_i)));
        assert_eq!(staged.len(), 2);
        assert_eq!(staged.value_at(0).unwrap(), 30);
        assert_eq!(staged.value_at(1).unwrap(), 10);
    }
}
