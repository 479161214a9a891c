use std::{marker::PhantomData, sync::atomic::{AtomicUsize, Ordering}};

/// Structure holding possibly uninitialized data.
///
/// Access is not synchronised in any way; instead it is assumed that running
/// the initializer more than once is safe, and only one result is kept.
#[derive(Debug)]
pub struct SingleInit<T> {
    cell: AtomicUsize,
    _type: PhantomData<T>,
}

impl<T> SingleInit<T> {
    /// Create a new uninitialized atomic cell.
    pub const fn uninit() -> Self {
        SingleInit {
            cell: AtomicUsize::new(0),
            _type: PhantomData,
        }
    }
}

impl<T> SingleInit<T>
where
    T: Sync,
    Self: 'static,
{
    /// Get stored value, or `None` if it hasn't been initialized yet.
    pub fn get(&self) -> Option<&'static T> {
        let ptr = self.cell.load(Ordering::Acquire);

        if ptr != 0 {
            Some(unsafe { &*(ptr as *const T) })
        } else {
            None
        }
    }

    /// Get stored value, initializing it if necessary.
    pub fn get_or_init<F>(&self, init: F) -> &'static T
    where
        F: FnOnce() -> T,
    {
        self.get_or_try_init::<(), _>(|| Ok(init())).unwrap()
    }

    /// Same as [`SingleInit::get_or_init`] except that the initialisation
    /// function can fail.
    ///
    /// If it does fail the cell remains unchanged and initialisation can
    /// safely be attempted again.
    pub fn get_or_try_init<E, F>(&self, init: F) -> Result<&'static T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.get() {
            return Ok(value);
        }

        let value = Box::leak(Box::new(init()?)) as *mut T;

        match self.cell.compare_exchange(
            0, value as usize, Ordering::AcqRel, Ordering::Acquire,
        ) {
            Ok(_) => Ok(unsafe { &*value }),
            Err(old) => {
                // Another thread won the race; drop our value and use theirs.
                std::mem::drop(unsafe { Box::from_raw(value) });
                Ok(unsafe { &*(old as *const T) })
            }
        }
    }
}
