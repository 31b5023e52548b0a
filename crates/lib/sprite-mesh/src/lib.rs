mod atlas;
mod sprite;

use thiserror::Error;

pub use atlas::{GridAddress, PixelRect, TextureExtent};
pub use sprite::{SpriteDescription, SpriteMesh, DEFAULT_UV_INSET};

pub use mesh_buffers;

#[derive(Debug, Error)]
pub enum SpriteMeshError {
    #[error("sprite sheet grid must be at least 1x1, got {columns}x{rows}")]
    EmptyGrid { columns: u32, rows: u32 },
    #[error("cell ({column}, {row}) is outside the {columns}x{rows} sprite sheet grid")]
    CellOutOfRange {
        column: u32,
        row: u32,
        columns: u32,
        rows: u32,
    },
    #[error("texture extent must be non-zero, got {width}x{height}")]
    EmptyTexture { width: u32, height: u32 },
}
