/// Viewports, topology, colors and render target bindings

/// Maximum viewports and scissor rectangles bound at once
pub const MAX_VIEWPORTS: usize = 16;

/// Viewport rectangle and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-depth viewport at the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self { x: 0.0, y: 0.0, width, height, min_depth: 0.0, max_depth: 1.0 }
    }
}

/// Scissor rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScissorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// How vertices are assembled into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    Undefined,
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
    LineListAdj,
    LineStripAdj,
    TriangleListAdj,
    TriangleStripAdj,
    /// Patch list with 1 to 32 control points
    PatchList(u8),
}

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub const BLACK: LinearColor = LinearColor::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: LinearColor = LinearColor::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: LinearColor = LinearColor::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<glam::Vec4> for LinearColor {
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

/// One color target of a `set_render_targets` call
///
/// An empty texture unbinds the slot.
#[derive(Debug)]
pub struct RenderTarget<'a, T> {
    pub texture: Option<&'a T>,
    /// Mip level whose render-target view is bound
    pub mip_level: u32,
}

impl<'a, T> RenderTarget<'a, T> {
    pub fn new(texture: Option<&'a T>, mip_level: u32) -> Self {
        Self { texture, mip_level }
    }
}

impl<T> Clone for RenderTarget<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RenderTarget<'_, T> {}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
