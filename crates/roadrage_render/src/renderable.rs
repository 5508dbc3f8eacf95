//! Turning entities into draw calls
//!
//! Rendering code never touches entities directly. Each visible entity
//! produces one [`DrawCall`] holding exactly the uniform data a shader
//! needs, handed to a [`RenderSink`] together with the mesh to draw.

use bytemuck::{Pod, Zeroable};
use roadrage_core::{Entity, MeshKind, World};
use roadrage_math::{AffineTransform, ProjectiveTransform};

/// Per-draw uniform block
///
/// Laid out for std140: the 3x3 normal matrix is stored as three columns
/// padded to four floats.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawCall {
    /// Projection * view * model, column-major
    pub mvp: [f32; 16],
    /// Model matrix, column-major
    pub model: [f32; 16],
    /// Inverse-transpose of the model's 3x3 block, padded columns
    pub normal: [f32; 12],
}

impl DrawCall {
    /// Uniforms for drawing `model` as seen through `view_projection`
    ///
    /// Falls back to the model's own 3x3 block for the normal matrix when
    /// the transform no longer tracks its 3x3 inverse.
    pub fn new(view_projection: &ProjectiveTransform, model: &AffineTransform) -> Self {
        let mvp = *view_projection * *model;
        let normal3 = model.normal_matrix().unwrap_or_else(|| model.array9f());

        let mut normal = [0.0f32; 12];
        for col in 0..3 {
            normal[col * 4..col * 4 + 3].copy_from_slice(&normal3[col * 3..col * 3 + 3]);
        }

        Self {
            mvp: mvp.array16f(),
            model: model.array16f(),
            normal,
        }
    }

    /// View as raw bytes for a uniform buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Receiver of draw calls: a GPU backend, or a recorder in headless runs
pub trait RenderSink {
    fn draw(&mut self, mesh: MeshKind, call: &DrawCall);
}

/// Something that can emit draw calls
pub trait Renderable {
    fn render(&self, view_projection: &ProjectiveTransform, sink: &mut dyn RenderSink);
}

impl Renderable for Entity {
    fn render(&self, view_projection: &ProjectiveTransform, sink: &mut dyn RenderSink) {
        if self.mesh == MeshKind::None {
            return;
        }
        sink.draw(self.mesh, &DrawCall::new(view_projection, self.transform.model_matrix()));
    }
}

impl Renderable for World {
    fn render(&self, view_projection: &ProjectiveTransform, sink: &mut dyn RenderSink) {
        for (_, entity) in self.iter() {
            entity.render(view_projection, sink);
        }
        log::trace!("Submitted {} entities", self.entity_count());
    }
}

/// Sink that keeps every draw call of a frame
#[derive(Clone, Debug, Default)]
pub struct FrameRecorder {
    calls: Vec<(MeshKind, DrawCall)>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls recorded since the last [`FrameRecorder::clear`]
    pub fn calls(&self) -> &[(MeshKind, DrawCall)] {
        &self.calls
    }

    /// Number of draws of a given mesh
    pub fn count(&self, mesh: MeshKind) -> usize {
        self.calls.iter().filter(|(m, _)| *m == mesh).count()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderSink for FrameRecorder {
    fn draw(&mut self, mesh: MeshKind, call: &DrawCall) {
        self.calls.push((mesh, *call));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadrage_core::{Car, Transform, Vec3};

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_draw_call_size() {
        assert_eq!(std::mem::size_of::<DrawCall>(), (16 + 16 + 12) * 4);
        let call = DrawCall::new(&ProjectiveTransform::identity(), &AffineTransform::identity());
        assert_eq!(call.as_bytes().len(), std::mem::size_of::<DrawCall>());
    }

    #[test]
    fn test_draw_call_combines_matrices() {
        let vp = ProjectiveTransform::perspective_default(45.0, 1.0);
        let model = AffineTransform::translation(Vec3::new(0.0, 0.0, -10.0));
        let call = DrawCall::new(&vp, &model);
        let expected = (vp * model).array16f();
        assert_eq!(call.mvp, expected);
        assert_eq!(call.model, model.array16f());
        // Pure translation leaves normals alone
        assert_eq!(&call.normal[0..3], &[1.0, 0.0, 0.0]);
        assert_eq!(call.normal[3], 0.0);
    }

    #[test]
    fn test_normal_matrix_undoes_scale() {
        let model = AffineTransform::scale(Vec3::new(2.0, 4.0, 1.0));
        let call = DrawCall::new(&ProjectiveTransform::identity(), &model);
        assert!(approx_eq(call.normal[0], 0.5));
        assert!(approx_eq(call.normal[5], 0.25));
        assert!(approx_eq(call.normal[10], 1.0));
    }

    #[test]
    fn test_entities_without_mesh_are_skipped() {
        let mut recorder = FrameRecorder::new();
        let vp = ProjectiveTransform::identity();
        Entity::new(MeshKind::None, Transform::identity()).render(&vp, &mut recorder);
        assert!(recorder.is_empty());

        Entity::new(MeshKind::Axes, Transform::identity()).render(&vp, &mut recorder);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_world_renders_every_entity() {
        let mut world = World::new();
        world.add_entity(Entity::new(MeshKind::Axes, Transform::identity()));
        world.add_entity(Entity::new(MeshKind::Car, Transform::identity()).with_car(Car::default()));
        world.add_entity(Entity::new(MeshKind::Civilian, Transform::identity()));
        world.add_entity(Entity::new(MeshKind::Civilian, Transform::identity()));

        let mut recorder = FrameRecorder::new();
        world.render(&ProjectiveTransform::identity(), &mut recorder);
        assert_eq!(recorder.len(), 4);
        assert_eq!(recorder.count(MeshKind::Civilian), 2);
        assert_eq!(recorder.count(MeshKind::Car), 1);

        recorder.clear();
        assert!(recorder.is_empty());
    }
}
