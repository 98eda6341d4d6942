use crate::{element::Handle, error::Error};
use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
};

/// One type-erased column of per-element values.
///
/// The concrete type behind the trait is always `Column<T>`, and the vtable
/// carries everything the owning container needs to keep the column in
/// lockstep with its rows without knowing `T`: growing fills in defaults,
/// compaction moves surviving values through the old-to-new index map.
trait ErasedColumn: Any {
    fn clear(&mut self);

    fn reserve(&mut self, n: usize);

    fn resize(&mut self, n: usize);

    fn push(&mut self, n: usize);

    fn compact(&mut self, new_indices: &[Option<u32>]);

    fn clone_box(&self) -> Box<dyn ErasedColumn>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Column<T> {
    data: Vec<T>,
}

impl<T> ErasedColumn for Column<T>
where
    T: Default + Clone + 'static,
{
    fn clear(&mut self) {
        self.data.clear();
    }

    fn reserve(&mut self, n: usize) {
        self.data.reserve(n);
    }

    fn resize(&mut self, n: usize) {
        self.data.resize(n, T::default());
    }

    fn push(&mut self, n: usize) {
        let len = self.data.len();
        self.data.resize(len + n, T::default());
    }

    fn compact(&mut self, new_indices: &[Option<u32>]) {
        let mut count = 0;
        for (old, new) in new_indices.iter().enumerate() {
            if let Some(new) = new {
                let new = *new as usize;
                if new != old {
                    self.data[new] = self.data[old].clone();
                }
                count += 1;
            }
        }
        self.data.truncate(count);
    }

    fn clone_box(&self) -> Box<dyn ErasedColumn> {
        Box::new(Column {
            data: self.data.clone(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct CustomColumn {
    type_id: TypeId,
    type_name: &'static str,
    data: Box<dyn ErasedColumn>,
}

impl Clone for CustomColumn {
    fn clone(&self) -> Self {
        CustomColumn {
            type_id: self.type_id,
            type_name: self.type_name,
            data: self.data.clone_box(),
        }
    }
}

/// Per-container registry of custom components: a map from a user chosen
/// name to a column of arbitrary value type, parallel to the element rows.
///
/// All elements of a container share the same name-to-type binding. Access
/// is checked at runtime: reading a column with a type other than the one it
/// was registered with is an error.
#[derive(Default, Clone)]
pub(crate) struct CustomComponents {
    columns: HashMap<String, CustomColumn>,
}

impl CustomComponents {
    /// Register a new column filled with `len` default values.
    ///
    /// An existing column with the same name is replaced, no matter its old
    /// type.
    pub fn add<T>(&mut self, name: &str, len: usize)
    where
        T: Default + Clone + 'static,
    {
        self.columns.insert(
            name.to_string(),
            CustomColumn {
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
                data: Box::new(Column::<T> {
                    data: vec![T::default(); len],
                }),
            },
        );
    }

    /// Drop the named column. Does nothing if the name is unknown.
    pub fn remove(&mut self, name: &str) {
        self.columns.remove(name);
    }

    pub fn has(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn get<T>(&self, name: &str) -> Result<&[T], Error>
    where
        T: Default + Clone + 'static,
    {
        let col = self
            .columns
            .get(name)
            .ok_or_else(|| Error::ComponentDoesNotExist(name.to_string()))?;
        match col.data.as_any().downcast_ref::<Column<T>>() {
            Some(column) => Ok(&column.data),
            None => Err(Error::BadCustomComponentType {
                name: name.to_string(),
                registered: col.type_name,
                requested: type_name::<T>(),
            }),
        }
    }

    pub fn get_mut<T>(&mut self, name: &str) -> Result<&mut [T], Error>
    where
        T: Default + Clone + 'static,
    {
        let col = self
            .columns
            .get_mut(name)
            .ok_or_else(|| Error::ComponentDoesNotExist(name.to_string()))?;
        match col.data.as_any_mut().downcast_mut::<Column<T>>() {
            Some(column) => Ok(&mut column.data),
            None => Err(Error::BadCustomComponentType {
                name: name.to_string(),
                registered: col.type_name,
                requested: type_name::<T>(),
            }),
        }
    }

    /// Whether the named column stores values of type `T`.
    pub fn is_of_type<T: 'static>(&self, name: &str) -> Result<bool, Error> {
        self.columns
            .get(name)
            .map(|col| col.type_id == TypeId::of::<T>())
            .ok_or_else(|| Error::ComponentDoesNotExist(name.to_string()))
    }

    /// Names of all registered columns, in no particular order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.keys().map(|name| name.as_str()).collect()
    }

    /// Names of all columns storing values of type `T`.
    pub fn names_of_type<T: 'static>(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, col)| col.type_id == TypeId::of::<T>())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        for col in self.columns.values_mut() {
            col.data.clear();
        }
    }

    pub fn reserve(&mut self, n: usize) {
        for col in self.columns.values_mut() {
            col.data.reserve(n);
        }
    }

    pub fn resize(&mut self, n: usize) {
        for col in self.columns.values_mut() {
            col.data.resize(n);
        }
    }

    pub fn push(&mut self, n: usize) {
        for col in self.columns.values_mut() {
            col.data.push(n);
        }
    }

    pub fn compact(&mut self, new_indices: &[Option<u32>]) {
        for col in self.columns.values_mut() {
            col.data.compact(new_indices);
        }
    }

    /// Rewrite columns holding handles of type `H` through a compaction map.
    ///
    /// `Option<H>` slots whose target was deleted become `None`; entries of
    /// `Vec<H>` lists whose target was deleted are dropped from the list.
    /// Columns of any other type are left alone.
    pub fn remap_handles<H>(&mut self, new_indices: &[Option<u32>])
    where
        H: Handle + From<u32> + Copy + 'static,
    {
        for col in self.columns.values_mut() {
            if let Some(column) = col.data.as_any_mut().downcast_mut::<Column<Option<H>>>() {
                for slot in &mut column.data {
                    *slot = slot
                        .and_then(|h| new_indices[h.index() as usize])
                        .map(H::from);
                }
            } else if let Some(column) = col.data.as_any_mut().downcast_mut::<Column<Vec<H>>>() {
                for list in &mut column.data {
                    *list = list
                        .iter()
                        .filter_map(|h| new_indices[h.index() as usize])
                        .map(H::from)
                        .collect();
                }
            }
        }
    }
}
