use crate::{
    color::Color,
    element::{EH, FH, VH, Handle},
    error::Error,
    mesh::Mesh,
};

/// Optional component access.
///
/// Every optional column comes with the same family of functions:
/// `is_per_*_enabled`, `enable_per_*`, `disable_per_*`, a `require_per_*`
/// guard that returns [`Error::MissingComponent`] instead of a bool, a
/// per-element getter/setter pair, and a whole-column slice accessor for
/// exporters. Enabling allocates one default value per slot and is
/// idempotent; disabling drops the storage.
impl Mesh {
    /*** Vertex normals ***/

    pub fn is_per_vertex_normal_enabled(&self) -> bool {
        self.vertices.components.normal.is_enabled()
    }

    pub fn enable_per_vertex_normal(&mut self) {
        let n = self.vertices.slot_count();
        self.vertices.components.normal.enable(n);
    }

    pub fn disable_per_vertex_normal(&mut self) {
        self.vertices.components.normal.disable();
    }

    pub fn require_per_vertex_normal(&self) -> Result<(), Error> {
        self.vertices.components.normal.require()
    }

    pub fn vertex_normal(&self, v: VH) -> Result<glam::Vec3, Error> {
        Ok(*self.vertices.components.normal.get(v.index() as usize)?)
    }

    pub fn set_vertex_normal(&mut self, v: VH, normal: glam::Vec3) -> Result<(), Error> {
        *self.vertices.components.normal.get_mut(v.index() as usize)? = normal;
        Ok(())
    }

    /// One normal per vertex slot, tombstones included.
    pub fn vertex_normals(&self) -> Result<&[glam::Vec3], Error> {
        self.vertices.components.normal.as_slice()
    }

    /*** Vertex colors ***/

    pub fn is_per_vertex_color_enabled(&self) -> bool {
        self.vertices.components.color.is_enabled()
    }

    pub fn enable_per_vertex_color(&mut self) {
        let n = self.vertices.slot_count();
        self.vertices.components.color.enable(n);
    }

    pub fn disable_per_vertex_color(&mut self) {
        self.vertices.components.color.disable();
    }

    pub fn require_per_vertex_color(&self) -> Result<(), Error> {
        self.vertices.components.color.require()
    }

    pub fn vertex_color(&self, v: VH) -> Result<Color, Error> {
        Ok(*self.vertices.components.color.get(v.index() as usize)?)
    }

    pub fn set_vertex_color(&mut self, v: VH, color: Color) -> Result<(), Error> {
        *self.vertices.components.color.get_mut(v.index() as usize)? = color;
        Ok(())
    }

    pub fn vertex_colors(&self) -> Result<&[Color], Error> {
        self.vertices.components.color.as_slice()
    }

    /*** Vertex quality ***/

    pub fn is_per_vertex_quality_enabled(&self) -> bool {
        self.vertices.components.quality.is_enabled()
    }

    pub fn enable_per_vertex_quality(&mut self) {
        let n = self.vertices.slot_count();
        self.vertices.components.quality.enable(n);
    }

    pub fn disable_per_vertex_quality(&mut self) {
        self.vertices.components.quality.disable();
    }

    pub fn require_per_vertex_quality(&self) -> Result<(), Error> {
        self.vertices.components.quality.require()
    }

    pub fn vertex_quality(&self, v: VH) -> Result<f64, Error> {
        Ok(*self.vertices.components.quality.get(v.index() as usize)?)
    }

    pub fn set_vertex_quality(&mut self, v: VH, quality: f64) -> Result<(), Error> {
        *self.vertices.components.quality.get_mut(v.index() as usize)? = quality;
        Ok(())
    }

    pub fn vertex_qualities(&self) -> Result<&[f64], Error> {
        self.vertices.components.quality.as_slice()
    }

    /*** Vertex texture coordinates ***/

    pub fn is_per_vertex_tex_coord_enabled(&self) -> bool {
        self.vertices.components.tex_coord.is_enabled()
    }

    pub fn enable_per_vertex_tex_coord(&mut self) {
        let n = self.vertices.slot_count();
        self.vertices.components.tex_coord.enable(n);
    }

    pub fn disable_per_vertex_tex_coord(&mut self) {
        self.vertices.components.tex_coord.disable();
    }

    pub fn require_per_vertex_tex_coord(&self) -> Result<(), Error> {
        self.vertices.components.tex_coord.require()
    }

    pub fn vertex_tex_coord(&self, v: VH) -> Result<glam::Vec2, Error> {
        Ok(*self.vertices.components.tex_coord.get(v.index() as usize)?)
    }

    pub fn set_vertex_tex_coord(&mut self, v: VH, tc: glam::Vec2) -> Result<(), Error> {
        *self.vertices.components.tex_coord.get_mut(v.index() as usize)? = tc;
        Ok(())
    }

    pub fn vertex_tex_coords(&self) -> Result<&[glam::Vec2], Error> {
        self.vertices.components.tex_coord.as_slice()
    }

    /*** Vertex adjacent faces ***/

    pub fn is_per_vertex_adj_faces_enabled(&self) -> bool {
        self.vertices.components.adj_faces.is_enabled()
    }

    pub fn enable_per_vertex_adj_faces(&mut self) {
        let n = self.vertices.slot_count();
        self.vertices.components.adj_faces.enable(n);
    }

    pub fn disable_per_vertex_adj_faces(&mut self) {
        self.vertices.components.adj_faces.disable();
    }

    pub fn require_per_vertex_adj_faces(&self) -> Result<(), Error> {
        self.vertices.components.adj_faces.require()
    }

    pub fn vertex_adj_faces(&self, v: VH) -> Result<&[Option<FH>], Error> {
        Ok(self.vertices.components.adj_faces.get(v.index() as usize)?)
    }

    pub fn vertex_adj_faces_mut(&mut self, v: VH) -> Result<&mut Vec<Option<FH>>, Error> {
        self.vertices.components.adj_faces.get_mut(v.index() as usize)
    }

    /*** Vertex adjacent vertices ***/

    pub fn is_per_vertex_adj_vertices_enabled(&self) -> bool {
        self.vertices.components.adj_vertices.is_enabled()
    }

    pub fn enable_per_vertex_adj_vertices(&mut self) {
        let n = self.vertices.slot_count();
        self.vertices.components.adj_vertices.enable(n);
    }

    pub fn disable_per_vertex_adj_vertices(&mut self) {
        self.vertices.components.adj_vertices.disable();
    }

    pub fn require_per_vertex_adj_vertices(&self) -> Result<(), Error> {
        self.vertices.components.adj_vertices.require()
    }

    pub fn vertex_adj_vertices(&self, v: VH) -> Result<&[Option<VH>], Error> {
        Ok(self
            .vertices
            .components
            .adj_vertices
            .get(v.index() as usize)?)
    }

    pub fn vertex_adj_vertices_mut(&mut self, v: VH) -> Result<&mut Vec<Option<VH>>, Error> {
        self.vertices
            .components
            .adj_vertices
            .get_mut(v.index() as usize)
    }

    /*** Face normals ***/

    pub fn is_per_face_normal_enabled(&self) -> bool {
        self.faces.components.normal.is_enabled()
    }

    pub fn enable_per_face_normal(&mut self) {
        let n = self.faces.slot_count();
        self.faces.components.normal.enable(n);
    }

    pub fn disable_per_face_normal(&mut self) {
        self.faces.components.normal.disable();
    }

    pub fn require_per_face_normal(&self) -> Result<(), Error> {
        self.faces.components.normal.require()
    }

    pub fn face_normal(&self, f: FH) -> Result<glam::Vec3, Error> {
        Ok(*self.faces.components.normal.get(f.index() as usize)?)
    }

    pub fn set_face_normal(&mut self, f: FH, normal: glam::Vec3) -> Result<(), Error> {
        *self.faces.components.normal.get_mut(f.index() as usize)? = normal;
        Ok(())
    }

    pub fn face_normals(&self) -> Result<&[glam::Vec3], Error> {
        self.faces.components.normal.as_slice()
    }

    /*** Face colors ***/

    pub fn is_per_face_color_enabled(&self) -> bool {
        self.faces.components.color.is_enabled()
    }

    pub fn enable_per_face_color(&mut self) {
        let n = self.faces.slot_count();
        self.faces.components.color.enable(n);
    }

    pub fn disable_per_face_color(&mut self) {
        self.faces.components.color.disable();
    }

    pub fn require_per_face_color(&self) -> Result<(), Error> {
        self.faces.components.color.require()
    }

    pub fn face_color(&self, f: FH) -> Result<Color, Error> {
        Ok(*self.faces.components.color.get(f.index() as usize)?)
    }

    pub fn set_face_color(&mut self, f: FH, color: Color) -> Result<(), Error> {
        *self.faces.components.color.get_mut(f.index() as usize)? = color;
        Ok(())
    }

    pub fn face_colors(&self) -> Result<&[Color], Error> {
        self.faces.components.color.as_slice()
    }

    /*** Face quality ***/

    pub fn is_per_face_quality_enabled(&self) -> bool {
        self.faces.components.quality.is_enabled()
    }

    pub fn enable_per_face_quality(&mut self) {
        let n = self.faces.slot_count();
        self.faces.components.quality.enable(n);
    }

    pub fn disable_per_face_quality(&mut self) {
        self.faces.components.quality.disable();
    }

    pub fn require_per_face_quality(&self) -> Result<(), Error> {
        self.faces.components.quality.require()
    }

    pub fn face_quality(&self, f: FH) -> Result<f64, Error> {
        Ok(*self.faces.components.quality.get(f.index() as usize)?)
    }

    pub fn set_face_quality(&mut self, f: FH, quality: f64) -> Result<(), Error> {
        *self.faces.components.quality.get_mut(f.index() as usize)? = quality;
        Ok(())
    }

    pub fn face_qualities(&self) -> Result<&[f64], Error> {
        self.faces.components.quality.as_slice()
    }

    /*** Face adjacent faces ***/

    pub fn is_per_face_adj_faces_enabled(&self) -> bool {
        self.faces.components.adj_faces.is_enabled()
    }

    pub fn enable_per_face_adj_faces(&mut self) {
        let n = self.faces.slot_count();
        self.faces.components.adj_faces.enable(n);
    }

    pub fn disable_per_face_adj_faces(&mut self) {
        self.faces.components.adj_faces.disable();
    }

    pub fn require_per_face_adj_faces(&self) -> Result<(), Error> {
        self.faces.components.adj_faces.require()
    }

    pub fn face_adj_faces(&self, f: FH) -> Result<&[Option<FH>], Error> {
        Ok(self.faces.components.adj_faces.get(f.index() as usize)?)
    }

    pub fn face_adj_faces_mut(&mut self, f: FH) -> Result<&mut Vec<Option<FH>>, Error> {
        self.faces.components.adj_faces.get_mut(f.index() as usize)
    }

    /*** Edge colors ***/

    pub fn is_per_edge_color_enabled(&self) -> bool {
        self.edges.components.color.is_enabled()
    }

    pub fn enable_per_edge_color(&mut self) {
        let n = self.edges.slot_count();
        self.edges.components.color.enable(n);
    }

    pub fn disable_per_edge_color(&mut self) {
        self.edges.components.color.disable();
    }

    pub fn require_per_edge_color(&self) -> Result<(), Error> {
        self.edges.components.color.require()
    }

    pub fn edge_color(&self, e: EH) -> Result<Color, Error> {
        Ok(*self.edges.components.color.get(e.index() as usize)?)
    }

    pub fn set_edge_color(&mut self, e: EH, color: Color) -> Result<(), Error> {
        *self.edges.components.color.get_mut(e.index() as usize)? = color;
        Ok(())
    }

    pub fn edge_colors(&self) -> Result<&[Color], Error> {
        self.edges.components.color.as_slice()
    }

    /*** Edge quality ***/

    pub fn is_per_edge_quality_enabled(&self) -> bool {
        self.edges.components.quality.is_enabled()
    }

    pub fn enable_per_edge_quality(&mut self) {
        let n = self.edges.slot_count();
        self.edges.components.quality.enable(n);
    }

    pub fn disable_per_edge_quality(&mut self) {
        self.edges.components.quality.disable();
    }

    pub fn require_per_edge_quality(&self) -> Result<(), Error> {
        self.edges.components.quality.require()
    }

    pub fn edge_quality(&self, e: EH) -> Result<f64, Error> {
        Ok(*self.edges.components.quality.get(e.index() as usize)?)
    }

    pub fn set_edge_quality(&mut self, e: EH, quality: f64) -> Result<(), Error> {
        *self.edges.components.quality.get_mut(e.index() as usize)? = quality;
        Ok(())
    }

    pub fn edge_qualities(&self) -> Result<&[f64], Error> {
        self.edges.components.quality.as_slice()
    }
}

/// Custom component access.
///
/// A custom component is a named column of arbitrary value type registered
/// at runtime. The name-to-type binding is shared by all elements of the
/// container; reading with the wrong type is an error, re-registering a name
/// replaces the column no matter its old type. Columns whose value type is
/// `Option` of a handle, or a `Vec` of handles, are rewritten on compaction
/// like the built-in reference components.
impl Mesh {
    pub fn add_vertex_custom_component<T>(&mut self, name: &str)
    where
        T: Default + Clone + 'static,
    {
        let n = self.vertices.slot_count();
        self.vertices.components.custom.add::<T>(name, n);
    }

    pub fn has_vertex_custom_component(&self, name: &str) -> bool {
        self.vertices.components.custom.has(name)
    }

    pub fn vertex_custom_component<T>(&self, name: &str) -> Result<&[T], Error>
    where
        T: Default + Clone + 'static,
    {
        self.vertices.components.custom.get::<T>(name)
    }

    pub fn vertex_custom_component_mut<T>(&mut self, name: &str) -> Result<&mut [T], Error>
    where
        T: Default + Clone + 'static,
    {
        self.vertices.components.custom.get_mut::<T>(name)
    }

    pub fn delete_vertex_custom_component(&mut self, name: &str) {
        self.vertices.components.custom.remove(name);
    }

    pub fn vertex_custom_component_names(&self) -> Vec<&str> {
        self.vertices.components.custom.names()
    }

    pub fn is_vertex_custom_component_of_type<T: 'static>(
        &self,
        name: &str,
    ) -> Result<bool, Error> {
        self.vertices.components.custom.is_of_type::<T>(name)
    }

    pub fn add_edge_custom_component<T>(&mut self, name: &str)
    where
        T: Default + Clone + 'static,
    {
        let n = self.edges.slot_count();
        self.edges.components.custom.add::<T>(name, n);
    }

    pub fn has_edge_custom_component(&self, name: &str) -> bool {
        self.edges.components.custom.has(name)
    }

    pub fn edge_custom_component<T>(&self, name: &str) -> Result<&[T], Error>
    where
        T: Default + Clone + 'static,
    {
        self.edges.components.custom.get::<T>(name)
    }

    pub fn edge_custom_component_mut<T>(&mut self, name: &str) -> Result<&mut [T], Error>
    where
        T: Default + Clone + 'static,
    {
        self.edges.components.custom.get_mut::<T>(name)
    }

    pub fn delete_edge_custom_component(&mut self, name: &str) {
        self.edges.components.custom.remove(name);
    }

    pub fn edge_custom_component_names(&self) -> Vec<&str> {
        self.edges.components.custom.names()
    }

    pub fn is_edge_custom_component_of_type<T: 'static>(&self, name: &str) -> Result<bool, Error> {
        self.edges.components.custom.is_of_type::<T>(name)
    }

    pub fn add_face_custom_component<T>(&mut self, name: &str)
    where
        T: Default + Clone + 'static,
    {
        let n = self.faces.slot_count();
        self.faces.components.custom.add::<T>(name, n);
    }

    pub fn has_face_custom_component(&self, name: &str) -> bool {
        self.faces.components.custom.has(name)
    }

    pub fn face_custom_component<T>(&self, name: &str) -> Result<&[T], Error>
    where
        T: Default + Clone + 'static,
    {
        self.faces.components.custom.get::<T>(name)
    }

    pub fn face_custom_component_mut<T>(&mut self, name: &str) -> Result<&mut [T], Error>
    where
        T: Default + Clone + 'static,
    {
        self.faces.components.custom.get_mut::<T>(name)
    }

    pub fn delete_face_custom_component(&mut self, name: &str) {
        self.faces.components.custom.remove(name);
    }

    pub fn face_custom_component_names(&self) -> Vec<&str> {
        self.faces.components.custom.names()
    }

    pub fn is_face_custom_component_of_type<T: 'static>(&self, name: &str) -> Result<bool, Error> {
        self.faces.components.custom.is_of_type::<T>(name)
    }
}
