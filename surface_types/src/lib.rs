//! # Surface Types
//!
//! This crate defines the surface and geometry types shared between the
//! surface controller and the renderer connector.
//!
//! ## Philosophy
//!
//! - **Plain data, not widgets**: A surface is a rectangle plus a content
//!   description, not a node in some UI hierarchy
//! - **Host-mutated, controller-read**: The host moves and retargets the
//!   surface; the controller only observes it and diffs
//! - **Testable**: All types are serializable and comparable, so pushed
//!   state can be snapshot-tested
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A scene graph or layout engine
//! - A texture/GPU abstraction (the backing image is plain bytes)
//! - The connector wire format (that lives in `renderer_connector`)

use core::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point in the host's screen coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a point at the origin
    pub fn origin() -> Self {
        Self::default()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle: position plus extent.
///
/// The host's convention puts the origin at the bottom-left of the
/// rectangle; the remote content expects a top-left origin. The vertical
/// flip happens at the pointer-translation seam, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the rectangle's origin corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns true if the point falls inside the rectangle
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Converts a screen-space point into this rectangle's local space
    pub fn to_local(&self, point: Point) -> Point {
        Point::new(point.x - self.x, point.y - self.y)
    }

    /// Returns true if the rectangle has no horizontal extent.
    ///
    /// A zero-width rectangle means the host has not laid the surface out
    /// yet; initialization defers on it.
    pub fn is_zero_width(&self) -> bool {
        self.width == 0.0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

/// Unique identifier for a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    /// Creates a new unique surface ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SurfaceId from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface:{}", self.0)
    }
}

/// The rectangular region and content description the controller keeps
/// synchronized with the remote renderer.
///
/// The host owns mutation: layout moves `rect`, navigation replaces `url`.
/// The controller only reads these and diffs them against the last values
/// it pushed to the connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    id: SurfaceId,
    rect: Rect,
    url: String,
}

impl Surface {
    /// Creates a new surface with a zero rect (not laid out yet)
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: SurfaceId::new(),
            rect: Rect::default(),
            url: url.into(),
        }
    }

    /// Sets the initial rectangle
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Returns the surface ID
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Returns the current rectangle
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Replaces the rectangle (host layout path)
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Returns the current content URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Replaces the content URL (host navigation path)
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }
}

/// Bytes per pixel in a [`SurfaceImage`] (RGBA8888).
pub const BYTES_PER_PIXEL: usize = 4;

/// Owned pixel buffer backing a surface's displayed content.
///
/// Decoded frames land here; the host reads it back out to whatever its
/// display pipeline wants. Same decode → same pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SurfaceImage {
    /// Allocates a zeroed image of the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    /// Returns the image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the expected byte length of a full frame for this image
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the pixel bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the pixel bytes mutably
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}
