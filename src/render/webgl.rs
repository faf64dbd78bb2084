use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::error::{Result, TreeError};

/// Wrapper around WebGL2 context with helper methods
pub struct WebGLContext {
    pub gl: WebGl2RenderingContext,
}

impl WebGLContext {
    pub fn new(gl: WebGl2RenderingContext) -> Self {
        Self { gl }
    }

    /// Compile a shader from source
    pub fn compile_shader(&self, shader_type: u32, source: &str) -> Result<WebGlShader> {
        let gl = &self.gl;

        let shader = gl
            .create_shader(shader_type)
            .ok_or_else(|| TreeError::gl("failed to create shader"))?;

        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);

        if gl
            .get_shader_parameter(&shader, WebGl2RenderingContext::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            Ok(shader)
        } else {
            let log = gl.get_shader_info_log(&shader).unwrap_or_default();
            gl.delete_shader(Some(&shader));
            Err(TreeError::Gl(format!("shader compilation failed: {}", log)))
        }
    }

    /// Link a program from vertex and fragment sources
    pub fn create_program(&self, vert_src: &str, frag_src: &str) -> Result<WebGlProgram> {
        let gl = &self.gl;

        let vert_shader = self.compile_shader(WebGl2RenderingContext::VERTEX_SHADER, vert_src)?;
        let frag_shader = self.compile_shader(WebGl2RenderingContext::FRAGMENT_SHADER, frag_src)?;

        let program = gl
            .create_program()
            .ok_or_else(|| TreeError::gl("failed to create program"))?;

        gl.attach_shader(&program, &vert_shader);
        gl.attach_shader(&program, &frag_shader);
        gl.link_program(&program);

        // Linked into the program, no longer needed
        gl.delete_shader(Some(&vert_shader));
        gl.delete_shader(Some(&frag_shader));

        if gl
            .get_program_parameter(&program, WebGl2RenderingContext::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            Ok(program)
        } else {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            Err(TreeError::Gl(format!("program linking failed: {}", log)))
        }
    }

    /// Create an array buffer and upload data
    pub fn create_buffer_f32(&self, data: &[f32], usage: u32) -> Result<WebGlBuffer> {
        let buffer = self
            .gl
            .create_buffer()
            .ok_or_else(|| TreeError::gl("failed to create buffer"))?;
        self.upload_f32(&buffer, data, usage);
        Ok(buffer)
    }

    /// Replace the contents of an existing array buffer
    pub fn upload_f32(&self, buffer: &WebGlBuffer, data: &[f32], usage: u32) {
        let gl = &self.gl;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(buffer));

        // Safety: the view is consumed by buffer_data before any allocation
        unsafe {
            let array = js_sys::Float32Array::view(data);
            gl.buffer_data_with_array_buffer_view(WebGl2RenderingContext::ARRAY_BUFFER, &array, usage);
        }

        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);
    }

    /// Create an element buffer. Must be called with the target VAO bound,
    /// since the element binding is VAO state.
    pub fn create_index_buffer(&self, data: &[u16]) -> Result<WebGlBuffer> {
        let gl = &self.gl;

        let buffer = gl
            .create_buffer()
            .ok_or_else(|| TreeError::gl("failed to create index buffer"))?;
        gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, Some(&buffer));

        unsafe {
            let array = js_sys::Uint16Array::view(data);
            gl.buffer_data_with_array_buffer_view(
                WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER,
                &array,
                WebGl2RenderingContext::STATIC_DRAW,
            );
        }

        Ok(buffer)
    }

    pub fn create_vao(&self) -> Result<WebGlVertexArrayObject> {
        self.gl
            .create_vertex_array()
            .ok_or_else(|| TreeError::gl("failed to create VAO"))
    }

    /// Point float attribute `location` at `buffer`. A non-zero `divisor`
    /// makes it per-instance.
    pub fn float_attribute(
        &self,
        buffer: &WebGlBuffer,
        location: u32,
        size: i32,
        stride_floats: i32,
        offset_floats: i32,
        divisor: u32,
    ) {
        let gl = &self.gl;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(buffer));
        gl.enable_vertex_attrib_array(location);
        gl.vertex_attrib_pointer_with_i32(
            location,
            size,
            WebGl2RenderingContext::FLOAT,
            false,
            stride_floats * 4,
            offset_floats * 4,
        );
        gl.vertex_attrib_divisor(location, divisor);
    }

    /// Per-instance mat4 spread over four consecutive vec4 locations
    pub fn instance_matrix_attribute(&self, buffer: &WebGlBuffer, first_location: u32) {
        for column in 0..4 {
            self.float_attribute(buffer, first_location + column, 4, 16, column as i32 * 4, 1);
        }
    }

    pub fn get_uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    pub fn uniform_1f(&self, location: Option<&WebGlUniformLocation>, value: f32) {
        self.gl.uniform1f(location, value);
    }

    pub fn uniform_3f(&self, location: Option<&WebGlUniformLocation>, x: f32, y: f32, z: f32) {
        self.gl.uniform3f(location, x, y, z);
    }

    pub fn uniform_matrix4fv(&self, location: Option<&WebGlUniformLocation>, data: &[f32; 16]) {
        self.gl.uniform_matrix4fv_with_f32_array(location, false, data);
    }

    pub fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear_color(r, g, b, a);
        self.gl
            .clear(WebGl2RenderingContext::COLOR_BUFFER_BIT | WebGl2RenderingContext::DEPTH_BUFFER_BIT);
    }

    pub fn enable_depth_test(&self) {
        self.gl.enable(WebGl2RenderingContext::DEPTH_TEST);
    }

    /// Additive blending for glowing points; depth writes off so points
    /// don't occlude each other
    pub fn begin_additive(&self) {
        self.gl.enable(WebGl2RenderingContext::BLEND);
        self.gl
            .blend_func(WebGl2RenderingContext::SRC_ALPHA, WebGl2RenderingContext::ONE);
        self.gl.depth_mask(false);
    }

    pub fn end_blending(&self) {
        self.gl.disable(WebGl2RenderingContext::BLEND);
        self.gl.depth_mask(true);
    }

    pub fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }
}
