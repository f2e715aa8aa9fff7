// checkin-service/src/utils/qr.rs
use crate::models::{QrPayload, ServiceError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat, Luma};
use log::error;
use qrcode::types::QrError;
use qrcode::QrCode;
use std::io::Cursor;

// Pixels per QR module
const BOX_SIZE: u32 = 10;

// Encode the payload as JSON, render it as a QR PNG and return it base64-encoded
pub fn render_payload(payload: &QrPayload) -> Result<String, ServiceError> {
    let json = serde_json::to_string(payload)?;
    let png = render_png(json.as_bytes())?;
    Ok(STANDARD.encode(png))
}

pub fn render_png(data: &[u8]) -> Result<Vec<u8>, ServiceError> {
    let code = QrCode::new(data).map_err(|e| match e {
        QrError::DataTooLong => {
            ServiceError::Validation("Registration is too large to fit in a QR code".to_string())
        }
        other => {
            error!("❌ Failed to build QR code: {:?}", other);
            ServiceError::Storage(format!("QR encoding failed: {}", other))
        }
    })?;

    // quiet_zone adds the standard 4-module white border
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(BOX_SIZE, BOX_SIZE)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| {
            error!("❌ Failed to write QR PNG: {:?}", e);
            ServiceError::Storage(format!("PNG encoding failed: {}", e))
        })?;

    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_renders_as_base64_png() {
        let payload = QrPayload {
            team_id: "2f1c9a52-7d7e-4d8e-9a55-0d3c7c0b8f11".to_string(),
            team_name: "Alpha".to_string(),
            members: vec!["A".to_string(), "B".to_string()],
        };

        let encoded = render_payload(&payload).unwrap();
        let png = STANDARD.decode(encoded).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert_eq!(decoded.width(), decoded.height());
        assert_eq!(decoded.width() % BOX_SIZE, 0);
    }

    #[test]
    fn oversized_data_is_a_validation_error() {
        let data = vec![b'x'; 4000];
        assert!(matches!(render_png(&data), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn payload_json_has_exactly_three_fields() {
        let payload = QrPayload {
            team_id: "id".to_string(),
            team_name: "Alpha".to_string(),
            members: vec!["A".to_string()],
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "team_id": "id", "team_name": "Alpha", "members": ["A"] })
        );
    }
}
