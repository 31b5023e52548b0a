use serde::{Deserialize, Serialize};

use crate::SpriteMeshError;

/// Addresses one cell of a uniformly-divided sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridAddress {
    pub columns: u32,
    pub rows: u32,
    pub column: u32,
    pub row: u32,
}

impl GridAddress {
    pub fn new(columns: u32, rows: u32, column: u32, row: u32) -> Self {
        Self {
            columns,
            rows,
            column,
            row,
        }
    }

    /// The whole texture as a single cell.
    pub fn full() -> Self {
        Self::new(1, 1, 0, 0)
    }

    pub fn validate(&self) -> Result<(), SpriteMeshError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(SpriteMeshError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.column >= self.columns || self.row >= self.rows {
            return Err(SpriteMeshError::CellOutOfRange {
                column: self.column,
                row: self.row,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

impl Default for GridAddress {
    fn default() -> Self {
        Self::full()
    }
}

/// Pixel-space rectangle within a texture image. Measured from the top-left
/// corner of the image, like the sheets exported by sprite-packing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pixel dimensions of a texture image, queried once at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureExtent {
    pub width: u32,
    pub height: u32,
}

impl TextureExtent {
    pub fn from_parts(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), SpriteMeshError> {
        if self.width == 0 || self.height == 0 {
            return Err(SpriteMeshError::EmptyTexture {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(feature = "image")]
impl From<&image::DynamicImage> for TextureExtent {
    fn from(image: &image::DynamicImage) -> Self {
        use image::GenericImageView;

        let (width, height) = image.dimensions();
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_grid_is_a_single_cell() {
        let grid = GridAddress::full();
        assert_eq!(grid, GridAddress::new(1, 1, 0, 0));
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn zero_sized_grids_fail_validation() {
        assert!(matches!(
            GridAddress::new(0, 2, 0, 0).validate(),
            Err(SpriteMeshError::EmptyGrid { columns: 0, rows: 2 })
        ));
        assert!(matches!(
            GridAddress::new(2, 0, 0, 0).validate(),
            Err(SpriteMeshError::EmptyGrid { columns: 2, rows: 0 })
        ));
    }

    #[test]
    fn out_of_range_cells_fail_validation() {
        assert!(matches!(
            GridAddress::new(2, 2, 2, 0).validate(),
            Err(SpriteMeshError::CellOutOfRange { column: 2, .. })
        ));
        assert!(matches!(
            GridAddress::new(2, 2, 0, 5).validate(),
            Err(SpriteMeshError::CellOutOfRange { row: 5, .. })
        ));
    }

    #[test]
    fn zero_extent_fails_validation() {
        assert!(TextureExtent::from_parts(128, 64).validate().is_ok());
        assert!(matches!(
            TextureExtent::from_parts(0, 64).validate(),
            Err(SpriteMeshError::EmptyTexture { width: 0, .. })
        ));
    }

    #[test]
    fn grid_address_round_trips_through_json() {
        let grid = GridAddress::new(8, 4, 3, 1);
        let json = serde_json::to_string(&grid).unwrap();
        let back: GridAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }

    #[test]
    fn pixel_rect_deserializes_from_atlas_entry() {
        let rect: PixelRect =
            serde_json::from_str(r#"{"x":16,"y":32,"width":24,"height":24}"#).unwrap();
        assert_eq!(rect, PixelRect::new(16, 32, 24, 24));
    }
}
