use crate::{
    color::Color,
    custom::CustomComponents,
    element::{FH, VH},
    error::Error,
};

/// One optional component column: a vector parallel to the element rows of
/// the owning container, plus an enabled flag.
///
/// While disabled, the column owns no storage and its accessors return
/// [`Error::MissingComponent`]. Enabling allocates one default value per
/// row; the container keeps the column in lockstep with its rows from then
/// on. Enabling an already enabled column preserves its values, disabling a
/// disabled column is a no-op, and a disable/enable round trip resets every
/// value to the default.
pub(crate) struct OptionalVec<T> {
    data: Vec<T>,
    enabled: bool,
    name: &'static str,
}

impl<T> OptionalVec<T>
where
    T: Clone + Default,
{
    pub fn new(name: &'static str) -> Self {
        OptionalVec {
            data: Vec::new(),
            enabled: false,
            name,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self, len: usize) {
        if !self.enabled {
            self.enabled = true;
            self.data.resize(len, T::default());
        }
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.data = Vec::new();
    }

    pub fn get(&self, i: usize) -> Result<&T, Error> {
        if self.enabled {
            Ok(&self.data[i])
        } else {
            Err(Error::MissingComponent(self.name))
        }
    }

    pub fn get_mut(&mut self, i: usize) -> Result<&mut T, Error> {
        if self.enabled {
            Ok(&mut self.data[i])
        } else {
            Err(Error::MissingComponent(self.name))
        }
    }

    /// The column as a slice, one value per row including tombstoned rows.
    pub fn as_slice(&self) -> Result<&[T], Error> {
        if self.enabled {
            Ok(&self.data)
        } else {
            Err(Error::MissingComponent(self.name))
        }
    }

    pub fn as_mut_slice(&mut self) -> Result<&mut [T], Error> {
        if self.enabled {
            Ok(&mut self.data)
        } else {
            Err(Error::MissingComponent(self.name))
        }
    }

    pub fn require(&self) -> Result<(), Error> {
        if self.enabled {
            Ok(())
        } else {
            Err(Error::MissingComponent(self.name))
        }
    }

    pub fn clear(&mut self) {
        if self.enabled {
            self.data.clear();
        }
    }

    pub fn reserve(&mut self, n: usize) {
        if self.enabled {
            self.data.reserve(n);
        }
    }

    pub fn resize(&mut self, n: usize) {
        if self.enabled {
            self.data.resize(n, T::default());
        }
    }

    pub fn push(&mut self, n: usize) {
        if self.enabled {
            let len = self.data.len();
            self.data.resize(len + n, T::default());
        }
    }

    pub fn compact(&mut self, new_indices: &[Option<u32>]) {
        if !self.enabled {
            return;
        }
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

    /// Take over the enabled state and values of `other`. A column that is
    /// enabled here but disabled in `other` keeps its state; the caller is
    /// expected to fix up its length afterwards.
    pub fn import_from(&mut self, other: &Self) {
        if other.enabled {
            self.enabled = true;
            self.data = other.data.clone();
        }
    }
}

/// The set of columns a container owns for its element kind: every optional
/// component plus the custom component registry.
///
/// The container fans every storage mutation out to all of them, so that
/// enabled columns always have exactly one value per row.
pub(crate) trait ComponentStore: Default {
    fn clear(&mut self);

    fn reserve(&mut self, n: usize);

    fn resize(&mut self, n: usize);

    fn push(&mut self, n: usize);

    fn compact(&mut self, new_indices: &[Option<u32>]);

    /// Take over the columns of `other`: enabled state and values of its
    /// optional columns, and clones of its custom columns.
    fn import_from(&mut self, other: &Self);
}

pub(crate) struct VertexComponents {
    pub normal: OptionalVec<glam::Vec3>,
    pub color: OptionalVec<Color>,
    pub quality: OptionalVec<f64>,
    pub tex_coord: OptionalVec<glam::Vec2>,
    pub adj_faces: OptionalVec<Vec<Option<FH>>>,
    pub adj_vertices: OptionalVec<Vec<Option<VH>>>,
    pub custom: CustomComponents,
}

impl Default for VertexComponents {
    fn default() -> Self {
        VertexComponents {
            normal: OptionalVec::new("vertex normal"),
            color: OptionalVec::new("vertex color"),
            quality: OptionalVec::new("vertex quality"),
            tex_coord: OptionalVec::new("vertex tex coord"),
            adj_faces: OptionalVec::new("vertex adjacent faces"),
            adj_vertices: OptionalVec::new("vertex adjacent vertices"),
            custom: CustomComponents::default(),
        }
    }
}

impl ComponentStore for VertexComponents {
    fn clear(&mut self) {
        self.normal.clear();
        self.color.clear();
        self.quality.clear();
        self.tex_coord.clear();
        self.adj_faces.clear();
        self.adj_vertices.clear();
        self.custom.clear();
    }

    fn reserve(&mut self, n: usize) {
        self.normal.reserve(n);
        self.color.reserve(n);
        self.quality.reserve(n);
        self.tex_coord.reserve(n);
        self.adj_faces.reserve(n);
        self.adj_vertices.reserve(n);
        self.custom.reserve(n);
    }

    fn resize(&mut self, n: usize) {
        self.normal.resize(n);
        self.color.resize(n);
        self.quality.resize(n);
        self.tex_coord.resize(n);
        self.adj_faces.resize(n);
        self.adj_vertices.resize(n);
        self.custom.resize(n);
    }

    fn push(&mut self, n: usize) {
        self.normal.push(n);
        self.color.push(n);
        self.quality.push(n);
        self.tex_coord.push(n);
        self.adj_faces.push(n);
        self.adj_vertices.push(n);
        self.custom.push(n);
    }

    fn compact(&mut self, new_indices: &[Option<u32>]) {
        self.normal.compact(new_indices);
        self.color.compact(new_indices);
        self.quality.compact(new_indices);
        self.tex_coord.compact(new_indices);
        self.adj_faces.compact(new_indices);
        self.adj_vertices.compact(new_indices);
        self.custom.compact(new_indices);
    }

    fn import_from(&mut self, other: &Self) {
        self.normal.import_from(&other.normal);
        self.color.import_from(&other.color);
        self.quality.import_from(&other.quality);
        self.tex_coord.import_from(&other.tex_coord);
        self.adj_faces.import_from(&other.adj_faces);
        self.adj_vertices.import_from(&other.adj_vertices);
        self.custom = other.custom.clone();
    }
}

pub(crate) struct FaceComponents {
    pub normal: OptionalVec<glam::Vec3>,
    pub color: OptionalVec<Color>,
    pub quality: OptionalVec<f64>,
    pub adj_faces: OptionalVec<Vec<Option<FH>>>,
    pub custom: CustomComponents,
}

impl Default for FaceComponents {
    fn default() -> Self {
        FaceComponents {
            normal: OptionalVec::new("face normal"),
            color: OptionalVec::new("face color"),
            quality: OptionalVec::new("face quality"),
            adj_faces: OptionalVec::new("face adjacent faces"),
            custom: CustomComponents::default(),
        }
    }
}

impl ComponentStore for FaceComponents {
    fn clear(&mut self) {
        self.normal.clear();
        self.color.clear();
        self.quality.clear();
        self.adj_faces.clear();
        self.custom.clear();
    }

    fn reserve(&mut self, n: usize) {
        self.normal.reserve(n);
        self.color.reserve(n);
        self.quality.reserve(n);
        self.adj_faces.reserve(n);
        self.custom.reserve(n);
    }

    fn resize(&mut self, n: usize) {
        self.normal.resize(n);
        self.color.resize(n);
        self.quality.resize(n);
        self.adj_faces.resize(n);
        self.custom.resize(n);
    }

    fn push(&mut self, n: usize) {
        self.normal.push(n);
        self.color.push(n);
        self.quality.push(n);
        self.adj_faces.push(n);
        self.custom.push(n);
    }

    fn compact(&mut self, new_indices: &[Option<u32>]) {
        self.normal.compact(new_indices);
        self.color.compact(new_indices);
        self.quality.compact(new_indices);
        self.adj_faces.compact(new_indices);
        self.custom.compact(new_indices);
    }

    fn import_from(&mut self, other: &Self) {
        self.normal.import_from(&other.normal);
        self.color.import_from(&other.color);
        self.quality.import_from(&other.quality);
        self.adj_faces.import_from(&other.adj_faces);
        self.custom = other.custom.clone();
    }
}

pub(crate) struct EdgeComponents {
    pub color: OptionalVec<Color>,
    pub quality: OptionalVec<f64>,
    pub custom: CustomComponents,
}

impl Default for EdgeComponents {
    fn default() -> Self {
        EdgeComponents {
            color: OptionalVec::new("edge color"),
            quality: OptionalVec::new("edge quality"),
            custom: CustomComponents::default(),
        }
    }
}

impl ComponentStore for EdgeComponents {
    fn clear(&mut self) {
        self.color.clear();
        self.quality.clear();
        self.custom.clear();
    }

    fn reserve(&mut self, n: usize) {
        self.color.reserve(n);
        self.quality.reserve(n);
        self.custom.reserve(n);
    }

    fn resize(&mut self, n: usize) {
        self.color.resize(n);
        self.quality.resize(n);
        self.custom.resize(n);
    }

    fn push(&mut self, n: usize) {
        self.color.push(n);
        self.quality.push(n);
        self.custom.push(n);
    }

    fn compact(&mut self, new_indices: &[Option<u32>]) {
        self.color.compact(new_indices);
        self.quality.compact(new_indices);
        self.custom.compact(new_indices);
    }

    fn import_from(&mut self, other: &Self) {
        self.color.import_from(&other.color);
        self.quality.import_from(&other.quality);
        self.custom = other.custom.clone();
    }
}

#[cfg(test)]
mod test {
    use super::OptionalVec;
    use crate::error::Error;

    #[test]
    fn t_disabled_access() {
        let col = OptionalVec::<f64>::new("quality");
        assert_eq!(col.get(0), Err(Error::MissingComponent("quality")));
        assert_eq!(col.require(), Err(Error::MissingComponent("quality")));
        assert!(!col.is_enabled());
    }

    #[test]
    fn t_enable_is_idempotent() {
        let mut col = OptionalVec::<u32>::new("quality");
        col.enable(3);
        *col.get_mut(1).expect("Cannot write value") = 42;
        col.enable(3);
        assert!(col.is_enabled());
        assert_eq!(*col.get(1).expect("Cannot read value"), 42);
    }

    #[test]
    fn t_disable_is_idempotent() {
        let mut col = OptionalVec::<u32>::new("quality");
        col.disable();
        col.disable();
        assert!(!col.is_enabled());
    }

    #[test]
    fn t_reenable_resets_to_default() {
        let mut col = OptionalVec::<u32>::new("quality");
        col.enable(2);
        *col.get_mut(0).expect("Cannot write value") = 7;
        col.disable();
        col.enable(2);
        assert_eq!(*col.get(0).expect("Cannot read value"), 0);
    }

    #[test]
    fn t_resize_fills_defaults() {
        let mut col = OptionalVec::<u32>::new("quality");
        col.enable(2);
        *col.get_mut(1).expect("Cannot write value") = 5;
        col.resize(4);
        assert_eq!(col.as_slice().expect("Cannot read column"), &[0, 5, 0, 0]);
        // Resizing a disabled column allocates nothing.
        let mut other = OptionalVec::<u32>::new("quality");
        other.resize(10);
        assert!(other.as_slice().is_err());
    }

    #[test]
    fn t_compact() {
        let mut col = OptionalVec::<u32>::new("quality");
        col.enable(4);
        for i in 0..4 {
            *col.get_mut(i).expect("Cannot write value") = i as u32 + 1;
        }
        col.compact(&[Some(0), None, None, Some(1)]);
        assert_eq!(col.as_slice().expect("Cannot read column"), &[1, 4]);
    }
}
