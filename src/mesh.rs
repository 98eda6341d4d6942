use crate::{
    container::ElementContainer,
    element::{EH, Edge, FH, Face, Handle, VH, Vertex},
    error::Error,
    vertical::{EdgeComponents, FaceComponents, VertexComponents},
};

pub(crate) type VertexContainer = ElementContainer<Vertex, VertexComponents>;
pub(crate) type EdgeContainer = ElementContainer<Edge, EdgeComponents>;
pub(crate) type FaceContainer = ElementContainer<Face, FaceComponents>;

/**
 * A polygon mesh: one container of vertices, one of edges and one of faces,
 * each with its optional and custom component columns.
 *
 * Elements refer to each other with typed handles ([`VH`], [`EH`], [`FH`]),
 * which are stable across any growth of the underlying storage. Deletion
 * only tombstones a slot; handles to other elements keep working, and
 * handles to the deleted slot dangle at the tombstone until the container is
 * compacted. Compaction shifts live elements down to close the gaps and
 * rewrites every handle stored anywhere in the mesh, so that each one keeps
 * referring to the element it referred to before, or becomes null if that
 * element was deleted.
 *
 * Indexing with an out-of-range handle panics. Reading a tombstoned slot is
 * not an error by itself; callers that iterate with [`vertices`](Mesh::vertices)
 * and friends never see one.
 *
 * All mutation takes `&mut self`; concurrent reads through `&self` are safe.
 */
pub struct Mesh {
    pub(crate) vertices: VertexContainer,
    pub(crate) edges: EdgeContainer,
    pub(crate) faces: FaceContainer,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

fn remap<H>(slot: &mut Option<H>, new_indices: &[Option<u32>])
where
    H: Handle + From<u32> + Copy,
{
    *slot = (*slot)
        .and_then(|h| new_indices[h.index() as usize])
        .map(H::from);
}

impl Mesh {
    pub fn new() -> Self {
        Mesh {
            vertices: ElementContainer::new(),
            edges: ElementContainer::new(),
            faces: ElementContainer::new(),
        }
    }

    pub fn with_capacity(nverts: usize, nedges: usize, nfaces: usize) -> Self {
        let mut mesh = Self::new();
        mesh.vertices.reserve(nverts);
        mesh.edges.reserve(nedges);
        mesh.faces.reserve(nfaces);
        mesh
    }

    /// Drop all elements of all kinds. Optional and custom columns are
    /// emptied but keep their enabled state and registration.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.faces.clear();
    }

    /// Compact all three containers.
    pub fn compact(&mut self) {
        self.compact_vertices();
        self.compact_edges();
        self.compact_faces();
    }

    /*** Vertices ***/

    pub fn add_vertex(&mut self, position: glam::Vec3) -> VH {
        let vi = self.vertices.push();
        self.vertices.get_mut(vi).position = position;
        vi.into()
    }

    /// Append `n` vertices at the origin, returning the handle of the first.
    pub fn add_vertices(&mut self, n: usize) -> VH {
        self.vertices.push_many(n).into()
    }

    pub fn reserve_vertices(&mut self, n: usize) {
        self.vertices.reserve(n);
    }

    /// Grow or shrink the vertex slot count; shrinking tombstones the
    /// trailing slots without releasing storage.
    pub fn resize_vertices(&mut self, n: usize) {
        self.vertices.resize(n);
    }

    /// Tombstone a vertex. Faces and edges referencing it are left alone;
    /// their reference slots become null at the next vertex compaction.
    pub fn delete_vertex(&mut self, v: VH) {
        self.vertices.delete(v.index());
    }

    /// Number of live vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of vertex slots, tombstones included.
    pub fn vertex_slot_count(&self) -> usize {
        self.vertices.slot_count()
    }

    pub fn num_deleted_vertices(&self) -> usize {
        self.vertices.num_deleted()
    }

    pub fn is_vertex_container_compact(&self) -> bool {
        self.vertices.is_compact()
    }

    pub fn require_vertex_compactness(&self) -> Result<(), Error> {
        self.vertices.require_compactness("vertex container")
    }

    pub fn vertex(&self, v: VH) -> &Vertex {
        self.vertices.get(v.index())
    }

    pub fn vertex_mut(&mut self, v: VH) -> &mut Vertex {
        self.vertices.get_mut(v.index())
    }

    pub fn position(&self, v: VH) -> glam::Vec3 {
        self.vertex(v).position
    }

    pub fn set_position(&mut self, v: VH, position: glam::Vec3) {
        self.vertex_mut(v).position = position;
    }

    /// Handles of the live vertices, in storage order.
    pub fn vertices(&self) -> impl Iterator<Item = VH> + '_ {
        self.vertices.live_indices().map(|i| i.into())
    }

    /// The old-index-to-dense-index map a vertex compaction would apply
    /// right now, without mutating anything. Exporters use this to write a
    /// non-compact container as if it were compact; tombstoned slots map to
    /// `None`.
    pub fn vertex_compact_indices(&self) -> Vec<Option<u32>> {
        self.vertices.compact_map()
    }

    /// Remove tombstoned vertices and rewrite every vertex handle stored in
    /// the mesh, so surviving references keep their meaning.
    pub fn compact_vertices(&mut self) {
        if let Some(new_indices) = self.vertices.compact() {
            self.remap_vertex_handles(&new_indices);
        }
    }

    /*** Edges ***/

    pub fn add_edge(&mut self, v0: VH, v1: VH) -> EH {
        let ei = self.edges.push();
        self.edges.get_mut(ei).vertices = [Some(v0), Some(v1)];
        ei.into()
    }

    /// Append `n` edges with null vertex references, returning the handle of
    /// the first.
    pub fn add_edges(&mut self, n: usize) -> EH {
        self.edges.push_many(n).into()
    }

    pub fn reserve_edges(&mut self, n: usize) {
        self.edges.reserve(n);
    }

    pub fn resize_edges(&mut self, n: usize) {
        self.edges.resize(n);
    }

    pub fn delete_edge(&mut self, e: EH) {
        self.edges.delete(e.index());
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_slot_count(&self) -> usize {
        self.edges.slot_count()
    }

    pub fn num_deleted_edges(&self) -> usize {
        self.edges.num_deleted()
    }

    pub fn is_edge_container_compact(&self) -> bool {
        self.edges.is_compact()
    }

    pub fn require_edge_compactness(&self) -> Result<(), Error> {
        self.edges.require_compactness("edge container")
    }

    pub fn edge(&self, e: EH) -> &Edge {
        self.edges.get(e.index())
    }

    pub fn edge_mut(&mut self, e: EH) -> &mut Edge {
        self.edges.get_mut(e.index())
    }

    pub fn set_edge_vertices(&mut self, e: EH, v0: VH, v1: VH) {
        self.edge_mut(e).vertices = [Some(v0), Some(v1)];
    }

    pub fn edges(&self) -> impl Iterator<Item = EH> + '_ {
        self.edges.live_indices().map(|i| i.into())
    }

    pub fn edge_compact_indices(&self) -> Vec<Option<u32>> {
        self.edges.compact_map()
    }

    pub fn compact_edges(&mut self) {
        if let Some(new_indices) = self.edges.compact() {
            self.remap_edge_handles(&new_indices);
        }
    }

    /*** Faces ***/

    pub fn add_face(&mut self, verts: &[VH]) -> FH {
        let fi = self.faces.push();
        self.faces.get_mut(fi).vertices = verts.iter().map(|v| Some(*v)).collect();
        fi.into()
    }

    pub fn add_tri_face(&mut self, v0: VH, v1: VH, v2: VH) -> FH {
        self.add_face(&[v0, v1, v2])
    }

    pub fn add_quad_face(&mut self, v0: VH, v1: VH, v2: VH, v3: VH) -> FH {
        self.add_face(&[v0, v1, v2, v3])
    }

    /// Append `n` faces with no vertex references, returning the handle of
    /// the first.
    pub fn add_faces(&mut self, n: usize) -> FH {
        self.faces.push_many(n).into()
    }

    pub fn reserve_faces(&mut self, n: usize) {
        self.faces.reserve(n);
    }

    pub fn resize_faces(&mut self, n: usize) {
        self.faces.resize(n);
    }

    pub fn delete_face(&mut self, f: FH) {
        self.faces.delete(f.index());
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn face_slot_count(&self) -> usize {
        self.faces.slot_count()
    }

    pub fn num_deleted_faces(&self) -> usize {
        self.faces.num_deleted()
    }

    pub fn is_face_container_compact(&self) -> bool {
        self.faces.is_compact()
    }

    pub fn require_face_compactness(&self) -> Result<(), Error> {
        self.faces.require_compactness("face container")
    }

    pub fn face(&self, f: FH) -> &Face {
        self.faces.get(f.index())
    }

    pub fn face_mut(&mut self, f: FH) -> &mut Face {
        self.faces.get_mut(f.index())
    }

    pub fn set_face_vertices(&mut self, f: FH, verts: &[VH]) {
        self.face_mut(f).vertices = verts.iter().map(|v| Some(*v)).collect();
    }

    pub fn faces(&self) -> impl Iterator<Item = FH> + '_ {
        self.faces.live_indices().map(|i| i.into())
    }

    pub fn face_compact_indices(&self) -> Vec<Option<u32>> {
        self.faces.compact_map()
    }

    pub fn compact_faces(&mut self) {
        if let Some(new_indices) = self.faces.compact() {
            self.remap_face_handles(&new_indices);
        }
    }

    /*** Handle rewriting after compaction ***/

    /// Rewrite every stored vertex handle through a vertex compaction map:
    /// face and edge reference slots, the adjacent-vertices column, and
    /// vertex-handle custom columns of all three containers.
    fn remap_vertex_handles(&mut self, new_indices: &[Option<u32>]) {
        for fi in 0..self.faces.slot_count() as u32 {
            for slot in &mut self.faces.get_mut(fi).vertices {
                remap(slot, new_indices);
            }
        }
        for ei in 0..self.edges.slot_count() as u32 {
            for slot in &mut self.edges.get_mut(ei).vertices {
                remap(slot, new_indices);
            }
        }
        if let Ok(lists) = self.vertices.components.adj_vertices.as_mut_slice() {
            for list in lists {
                for slot in list {
                    remap(slot, new_indices);
                }
            }
        }
        self.vertices
            .components
            .custom
            .remap_handles::<VH>(new_indices);
        self.edges
            .components
            .custom
            .remap_handles::<VH>(new_indices);
        self.faces
            .components
            .custom
            .remap_handles::<VH>(new_indices);
    }

    /// Rewrite every stored face handle through a face compaction map: the
    /// adjacent-faces columns of vertices and faces, and face-handle custom
    /// columns of all three containers.
    fn remap_face_handles(&mut self, new_indices: &[Option<u32>]) {
        if let Ok(lists) = self.vertices.components.adj_faces.as_mut_slice() {
            for list in lists {
                for slot in list {
                    remap(slot, new_indices);
                }
            }
        }
        if let Ok(lists) = self.faces.components.adj_faces.as_mut_slice() {
            for list in lists {
                for slot in list {
                    remap(slot, new_indices);
                }
            }
        }
        self.vertices
            .components
            .custom
            .remap_handles::<FH>(new_indices);
        self.edges
            .components
            .custom
            .remap_handles::<FH>(new_indices);
        self.faces
            .components
            .custom
            .remap_handles::<FH>(new_indices);
    }

    /// No built-in column stores edge handles; only edge-handle custom
    /// columns need rewriting.
    fn remap_edge_handles(&mut self, new_indices: &[Option<u32>]) {
        self.vertices
            .components
            .custom
            .remap_handles::<EH>(new_indices);
        self.edges
            .components
            .custom
            .remap_handles::<EH>(new_indices);
        self.faces
            .components
            .custom
            .remap_handles::<EH>(new_indices);
    }
}

#[cfg(test)]
mod test {
    use super::Mesh;
    use crate::element::{FH, Handle, VH};
    use arrayvec::ArrayVec;

    /**
     * Makes a fan of four triangles around vertex 0.
     * ```text
     *
     *   4----3
     *   |\   |\
     *   | \  | \
     *   |  \ |  \
     *   5----0----2
     *        |   /
     *        |  /
     *        | /
     *        1
     * ```
     */
    fn tri_fan() -> Mesh {
        let mut mesh = Mesh::with_capacity(6, 0, 4);
        for i in 0..6 {
            let v = mesh.add_vertex(glam::vec3(i as f32, 0.0, 0.0));
            assert_eq!(v.index(), i);
        }
        let faces: Vec<_> = [[0u32, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]]
            .iter()
            .map(|fvi| {
                let vs = fvi.iter().map(|i| i.into()).collect::<ArrayVec<VH, 3>>();
                mesh.add_face(&vs)
            })
            .collect();
        assert_eq!(faces, (0..4u32).map(|i| i.into()).collect::<Vec<_>>());
        mesh
    }

    #[test]
    fn t_add_and_count() {
        let mesh = tri_fan();
        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.vertex_slot_count(), 6);
        assert_eq!(mesh.num_faces(), 4);
        assert!(mesh.is_vertex_container_compact());
        assert!(mesh.require_vertex_compactness().is_ok());
    }

    #[test]
    fn t_delete_leaves_slots() {
        let mut mesh = tri_fan();
        mesh.delete_vertex(1.into());
        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.vertex_slot_count(), 6);
        assert_eq!(mesh.num_deleted_vertices(), 1);
        assert!(mesh.require_vertex_compactness().is_err());
        // Live iteration skips the tombstone.
        assert_eq!(
            mesh.vertices().map(|v| v.index()).collect::<Vec<_>>(),
            [0, 2, 3, 4, 5]
        );
        // References are untouched until compaction.
        assert_eq!(mesh.face(0.into()).vertex(1), Some(1.into()));
    }

    #[test]
    fn t_compact_preserves_reference_identity() {
        let mut mesh = tri_fan();
        // Delete vertex 2 and the two faces using it.
        mesh.delete_vertex(2.into());
        mesh.delete_face(0.into());
        mesh.delete_face(1.into());
        // Surviving face 2 refers to vertices 0, 3, 4; remember their
        // positions.
        let expected: Vec<_> = mesh
            .face(2.into())
            .vertices()
            .iter()
            .map(|v| mesh.position(v.expect("Reference must not be null")))
            .collect();
        mesh.compact_vertices();
        mesh.compact_faces();
        assert!(mesh.is_vertex_container_compact());
        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.num_faces(), 2);
        // The face that was at index 2 now sits at index 0 and still refers
        // to the same vertices.
        let found: Vec<_> = mesh
            .face(0.into())
            .vertices()
            .iter()
            .map(|v| mesh.position(v.expect("Reference must not be null")))
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn t_compact_nulls_dangling_references() {
        let mut mesh = tri_fan();
        mesh.delete_vertex(3.into());
        // Faces 1 and 2 still reference the tombstone.
        mesh.compact_vertices();
        assert_eq!(mesh.face(1.into()).vertex(2), None);
        assert_eq!(mesh.face(2.into()).vertex(1), None);
        // Slots referring to survivors were rewritten, not nulled.
        assert_eq!(mesh.face(3.into()).vertex(1), Some(3.into()));
        assert_eq!(mesh.position(3.into()), glam::vec3(4.0, 0.0, 0.0));
    }

    #[test]
    fn t_add_delete_add_compact_round_trip() {
        let mut mesh = Mesh::new();
        let first = mesh.add_vertices(5);
        assert_eq!(first.index(), 0);
        for i in 0..5 {
            mesh.set_position(i.into(), glam::vec3(i as f32, 0.0, 0.0));
        }
        mesh.delete_vertex(2.into());
        let v = mesh.add_vertex(glam::vec3(5.0, 0.0, 0.0));
        // New elements always append; the tombstone stays until compaction.
        assert_eq!(v.index(), 5);
        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.vertex_slot_count(), 6);
        // An edge holds on to vertex 4 across the compaction.
        let e = mesh.add_edge(4.into(), v);
        mesh.compact_vertices();
        assert_eq!(mesh.num_vertices(), mesh.vertex_slot_count());
        let tracked = mesh.edge(e).vertex(0).expect("Reference must not be null");
        assert_eq!(mesh.position(tracked), glam::vec3(4.0, 0.0, 0.0));
    }

    #[test]
    fn t_growth_keeps_handles_valid() {
        let mut mesh = Mesh::new();
        let v = mesh.add_vertex(glam::vec3(1.0, 2.0, 3.0));
        let f = mesh.add_tri_face(v, v, v);
        // Force plenty of reallocation of the backing storage.
        mesh.add_vertices(10_000);
        mesh.reserve_vertices(100_000);
        assert_eq!(mesh.position(v), glam::vec3(1.0, 2.0, 3.0));
        assert_eq!(mesh.face(f).vertex(0), Some(v));
    }

    #[test]
    fn t_compact_faces_remaps_adjacency() {
        let mut mesh = tri_fan();
        mesh.enable_per_vertex_adj_faces();
        mesh.vertex_adj_faces_mut(0.into())
            .expect("Cannot access adjacency")
            .extend((0..4u32).map(|i| Some(FH::from(i))));
        mesh.delete_face(1.into());
        mesh.compact_faces();
        assert_eq!(
            mesh.vertex_adj_faces(0.into())
                .expect("Cannot access adjacency"),
            &[Some(0.into()), None, Some(1.into()), Some(2.into())]
        );
    }

    #[test]
    fn t_compact_remaps_custom_handle_columns() {
        let mut mesh = tri_fan();
        mesh.add_face_custom_component::<Option<VH>>("apex");
        {
            let apex = mesh
                .face_custom_component_mut::<Option<VH>>("apex")
                .expect("Cannot access custom component");
            for slot in apex.iter_mut() {
                *slot = Some(0.into());
            }
            apex[3] = Some(5.into());
        }
        mesh.delete_vertex(0.into());
        mesh.compact_vertices();
        let apex = mesh
            .face_custom_component::<Option<VH>>("apex")
            .expect("Cannot access custom component");
        assert_eq!(apex[0], None);
        assert_eq!(apex[3], Some(4.into()));
    }

    #[test]
    fn t_compact_indices_without_mutation() {
        let mut mesh = tri_fan();
        mesh.delete_vertex(1.into());
        mesh.delete_vertex(4.into());
        assert_eq!(
            mesh.vertex_compact_indices(),
            [Some(0), None, Some(1), Some(2), None, Some(3)]
        );
        // The query itself must not compact anything.
        assert_eq!(mesh.vertex_slot_count(), 6);
    }

    #[test]
    fn t_resize_then_compact() {
        let mut mesh = tri_fan();
        mesh.resize_vertices(3);
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.vertex_slot_count(), 6);
        mesh.compact_vertices();
        assert_eq!(mesh.vertex_slot_count(), 3);
        // Face 3 used vertices 4 and 5, which are gone now.
        assert_eq!(mesh.face(3.into()).vertex(1), None);
        assert_eq!(mesh.face(3.into()).vertex(2), None);
    }

    #[test]
    fn t_clear_keeps_component_registration() {
        let mut mesh = tri_fan();
        mesh.enable_per_vertex_color();
        mesh.add_vertex_custom_component::<u32>("weight");
        mesh.clear();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.is_per_vertex_color_enabled());
        assert!(mesh.has_vertex_custom_component("weight"));
    }
}
