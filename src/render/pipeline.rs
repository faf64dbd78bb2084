use log::{info, trace};
use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::shaders::*;
use super::webgl::WebGLContext;
use crate::error::Result;
use crate::foliage::{FoliageSystem, FoliageUniforms};
use crate::math::{Mat4, Vec3};
use crate::mesh::{cube, uv_sphere, Mesh};
use crate::ornaments::{OrnamentKind, OrnamentSystem};

const FOLIAGE_STRIDE: i32 = 7;
const MESH_STRIDE: i32 = 6;
const INSTANCE_MATRIX_LOCATION: u32 = 2;
const INSTANCE_COLOR_LOCATION: u32 = 6;

struct FoliageUniformLocations {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    progress: Option<WebGlUniformLocation>,
    point_size: Option<WebGlUniformLocation>,
    tree_height: Option<WebGlUniformLocation>,
}

struct OrnamentUniformLocations {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
}

/// GPU side of one ornament kind: shared mesh, static colors, and a
/// matrix buffer rewritten every frame
struct InstanceBatch {
    kind: OrnamentKind,
    vao: Option<WebGlVertexArrayObject>,
    matrix_buffer: Option<WebGlBuffer>,
    index_count: i32,
    instance_count: i32,
    /// Reused between frames
    scratch: Vec<f32>,
}

impl InstanceBatch {
    fn empty(kind: OrnamentKind) -> Self {
        Self {
            kind,
            vao: None,
            matrix_buffer: None,
            index_count: 0,
            instance_count: 0,
            scratch: Vec::new(),
        }
    }

    fn mesh(kind: OrnamentKind) -> Mesh {
        match kind {
            OrnamentKind::Ball => uv_sphere(1.0, 20, 14),
            OrnamentKind::Gift => cube(1.0),
            OrnamentKind::Light => uv_sphere(1.0, 10, 6),
        }
    }
}

/// Draws the foliage points and the instanced ornaments
pub struct RenderPipeline {
    ctx: WebGLContext,

    foliage_program: WebGlProgram,
    ornament_program: WebGlProgram,
    foliage_uniforms: FoliageUniformLocations,
    ornament_uniforms: OrnamentUniformLocations,

    foliage_vao: Option<WebGlVertexArrayObject>,
    foliage_count: i32,
    point_size: f32,
    tree_height: f32,

    batches: Vec<InstanceBatch>,

    width: i32,
    height: i32,

    pub camera_position: Vec3,
    pub camera_target: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32) -> Result<Self> {
        let ctx = WebGLContext::new(gl);

        let foliage_program = ctx.create_program(FOLIAGE_VERTEX_SHADER, FOLIAGE_FRAGMENT_SHADER)?;
        let ornament_program = ctx.create_program(ORNAMENT_VERTEX_SHADER, ORNAMENT_FRAGMENT_SHADER)?;

        let foliage_uniforms = FoliageUniformLocations {
            view: ctx.get_uniform_location(&foliage_program, "u_view"),
            projection: ctx.get_uniform_location(&foliage_program, "u_projection"),
            time: ctx.get_uniform_location(&foliage_program, "u_time"),
            progress: ctx.get_uniform_location(&foliage_program, "u_progress"),
            point_size: ctx.get_uniform_location(&foliage_program, "u_point_size"),
            tree_height: ctx.get_uniform_location(&foliage_program, "u_tree_height"),
        };

        let ornament_uniforms = OrnamentUniformLocations {
            view: ctx.get_uniform_location(&ornament_program, "u_view"),
            projection: ctx.get_uniform_location(&ornament_program, "u_projection"),
            camera_pos: ctx.get_uniform_location(&ornament_program, "u_camera_pos"),
            emissive: ctx.get_uniform_location(&ornament_program, "u_emissive"),
        };

        ctx.viewport(0, 0, width, height);

        Ok(Self {
            ctx,
            foliage_program,
            ornament_program,
            foliage_uniforms,
            ornament_uniforms,
            foliage_vao: None,
            foliage_count: 0,
            point_size: 1.0,
            tree_height: 1.0,
            batches: OrnamentKind::ALL.iter().map(|&k| InstanceBatch::empty(k)).collect(),
            width,
            height,
            camera_position: Vec3::new(0.0, 8.0, 30.0),
            camera_target: Vec3::new(0.0, 5.5, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
        })
    }

    /// Upload the static foliage attributes; only uniforms change afterwards
    pub fn upload_foliage(&mut self, foliage: &FoliageSystem) -> Result<()> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = self
            .ctx
            .create_buffer_f32(&foliage.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        // chaos(3) + target(3) + random(1)
        self.ctx.float_attribute(&buffer, 0, 3, FOLIAGE_STRIDE, 0, 0);
        self.ctx.float_attribute(&buffer, 1, 3, FOLIAGE_STRIDE, 3, 0);
        self.ctx.float_attribute(&buffer, 2, 1, FOLIAGE_STRIDE, 6, 0);

        gl.bind_vertex_array(None);

        self.foliage_vao = Some(vao);
        self.foliage_count = foliage.len() as i32;
        self.point_size = foliage.params().point_size;
        self.tree_height = foliage.params().height;
        info!("uploaded {} foliage points", foliage.len());
        Ok(())
    }

    /// Build one instanced batch per kind. Colors are written here and
    /// never again.
    pub fn upload_ornaments(&mut self, ornaments: &OrnamentSystem) -> Result<()> {
        let ctx = &self.ctx;
        let gl = &ctx.gl;

        for batch in &mut self.batches {
            let mesh = InstanceBatch::mesh(batch.kind);

            let vao = ctx.create_vao()?;
            gl.bind_vertex_array(Some(&vao));

            let vertex_buffer = ctx.create_buffer_f32(&mesh.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
            ctx.float_attribute(&vertex_buffer, 0, 3, MESH_STRIDE, 0, 0);
            ctx.float_attribute(&vertex_buffer, 1, 3, MESH_STRIDE, 3, 0);
            ctx.create_index_buffer(mesh.index_data())?;

            let colors = ornaments.color_data(batch.kind);
            let color_buffer = ctx.create_buffer_f32(&colors, WebGl2RenderingContext::STATIC_DRAW)?;
            ctx.float_attribute(&color_buffer, INSTANCE_COLOR_LOCATION, 3, 3, 0, 1);

            ornaments.fill_matrix_data(batch.kind, &mut batch.scratch);
            let matrix_buffer = ctx.create_buffer_f32(&batch.scratch, WebGl2RenderingContext::DYNAMIC_DRAW)?;
            ctx.instance_matrix_attribute(&matrix_buffer, INSTANCE_MATRIX_LOCATION);

            gl.bind_vertex_array(None);

            batch.vao = Some(vao);
            batch.matrix_buffer = Some(matrix_buffer);
            batch.index_count = mesh.index_data().len() as i32;
            batch.instance_count = ornaments.count_of(batch.kind) as i32;
        }

        info!("uploaded {} ornaments", ornaments.len());
        Ok(())
    }

    /// Rewrite every batch's instance matrices from the current transforms
    pub fn update_ornaments(&mut self, ornaments: &OrnamentSystem) {
        let ctx = &self.ctx;
        for batch in &mut self.batches {
            let Some(buffer) = batch.matrix_buffer.as_ref() else {
                trace!("{:?} batch not uploaded, skipping matrix update", batch.kind);
                continue;
            };
            ornaments.fill_matrix_data(batch.kind, &mut batch.scratch);
            ctx.upload_f32(buffer, &batch.scratch, WebGl2RenderingContext::DYNAMIC_DRAW);
        }
    }

    pub fn render(&self, foliage: FoliageUniforms) {
        let gl = &self.ctx.gl;

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let projection = Mat4::perspective(self.fov, aspect, 0.1, 200.0);
        let view = Mat4::look_at(self.camera_position, self.camera_target, Vec3::UP);

        self.ctx.clear(0.01, 0.02, 0.05, 1.0);
        self.ctx.enable_depth_test();

        // Opaque ornaments first so the additive points depth-test against them
        gl.use_program(Some(&self.ornament_program));
        self.ctx.uniform_matrix4fv(self.ornament_uniforms.view.as_ref(), view.as_slice());
        self.ctx
            .uniform_matrix4fv(self.ornament_uniforms.projection.as_ref(), projection.as_slice());
        let eye = self.camera_position;
        self.ctx
            .uniform_3f(self.ornament_uniforms.camera_pos.as_ref(), eye.x, eye.y, eye.z);

        for batch in &self.batches {
            if batch.vao.is_none() || batch.instance_count == 0 {
                continue;
            }
            self.ctx
                .uniform_1f(self.ornament_uniforms.emissive.as_ref(), batch.kind.emissive());
            gl.bind_vertex_array(batch.vao.as_ref());
            gl.draw_elements_instanced_with_i32(
                WebGl2RenderingContext::TRIANGLES,
                batch.index_count,
                WebGl2RenderingContext::UNSIGNED_SHORT,
                0,
                batch.instance_count,
            );
        }

        if self.foliage_vao.is_some() && self.foliage_count > 0 {
            gl.use_program(Some(&self.foliage_program));
            self.ctx.begin_additive();

            let u = &self.foliage_uniforms;
            self.ctx.uniform_matrix4fv(u.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(u.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_1f(u.time.as_ref(), foliage.time);
            self.ctx.uniform_1f(u.progress.as_ref(), foliage.progress);
            self.ctx.uniform_1f(u.point_size.as_ref(), self.point_size);
            self.ctx.uniform_1f(u.tree_height.as_ref(), self.tree_height);

            gl.bind_vertex_array(self.foliage_vao.as_ref());
            gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, self.foliage_count);

            self.ctx.end_blending();
        }

        gl.bind_vertex_array(None);
    }

    /// Only the viewport and aspect depend on the canvas size
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.ctx.viewport(0, 0, width, height);
    }
}
