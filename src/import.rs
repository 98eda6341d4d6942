use crate::mesh::Mesh;

impl Mesh {
    /// Enable on this mesh every optional component that is enabled on
    /// `other`. Components already enabled here stay enabled; nothing is
    /// disabled.
    pub fn enable_same_optional_components_of(&mut self, other: &Mesh) {
        if other.is_per_vertex_normal_enabled() {
            self.enable_per_vertex_normal();
        }
        if other.is_per_vertex_color_enabled() {
            self.enable_per_vertex_color();
        }
        if other.is_per_vertex_quality_enabled() {
            self.enable_per_vertex_quality();
        }
        if other.is_per_vertex_tex_coord_enabled() {
            self.enable_per_vertex_tex_coord();
        }
        if other.is_per_vertex_adj_faces_enabled() {
            self.enable_per_vertex_adj_faces();
        }
        if other.is_per_vertex_adj_vertices_enabled() {
            self.enable_per_vertex_adj_vertices();
        }
        if other.is_per_face_normal_enabled() {
            self.enable_per_face_normal();
        }
        if other.is_per_face_color_enabled() {
            self.enable_per_face_color();
        }
        if other.is_per_face_quality_enabled() {
            self.enable_per_face_quality();
        }
        if other.is_per_face_adj_faces_enabled() {
            self.enable_per_face_adj_faces();
        }
        if other.is_per_edge_color_enabled() {
            self.enable_per_edge_color();
        }
        if other.is_per_edge_quality_enabled() {
            self.enable_per_edge_quality();
        }
    }

    /// Replace this mesh's content with a best-effort copy of `other`.
    ///
    /// Everything `other` stores is copied: elements with their inline
    /// components and status flags, every enabled optional column (enabling
    /// it here first), and every custom column with its recorded type.
    /// Components enabled only on this mesh have no source to copy from;
    /// they stay enabled and come out holding default values. Handles copy
    /// verbatim, which keeps adjacency intact because slot counts match.
    pub fn import_from(&mut self, other: &Mesh) {
        self.vertices.import_from(&other.vertices);
        self.edges.import_from(&other.edges);
        self.faces.import_from(&other.faces);
    }
}
