//! Navigation link builders: per-device detail pages and the public
//! device catalog (vendor and model pages).

use url::Url;

/// Public device catalog base.
pub const CATALOG_BASE: &str = "https://www.zigbee2mqtt.io";

fn catalog_base() -> Url {
    Url::parse(CATALOG_BASE).expect("catalog base URL is valid")
}

/// Frontend route for a device's detail page, keyed by IEEE address.
pub fn device_details_path(ieee_address: &str) -> String {
    format!("/device/{ieee_address}")
}

/// Device detail URL under a configured frontend base.
pub fn device_details_url(frontend: &Url, ieee_address: &str) -> Url {
    let mut url = frontend.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(["device", ieee_address]);
    }
    url
}

/// Catalog page listing a vendor's supported devices.
pub fn vendor_url(vendor: &str) -> Url {
    let mut url = catalog_base();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(["supported-devices", ""]);
    }
    url.set_fragment(Some(&format!("v={vendor}")));
    url
}

/// Catalog page for a specific model. The segment is percent-encoded,
/// so models containing `/` stay a single path segment.
pub fn model_url(model: &str) -> Url {
    let mut url = catalog_base();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .push("devices")
            .push(&format!("{model}.html"));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn detail_path_is_keyed_by_ieee_address() {
        assert_eq!(
            device_details_path("0x00158d0001e2a3b4"),
            "/device/0x00158d0001e2a3b4"
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn detail_url_joins_onto_frontend_base() {
        let frontend = Url::parse("http://bridge.local:8080/").unwrap();
        let url = device_details_url(&frontend, "0x01");
        assert_eq!(url.as_str(), "http://bridge.local:8080/device/0x01");
    }

    #[test]
    fn vendor_url_carries_the_filter_fragment() {
        let url = vendor_url("IKEA");
        assert_eq!(
            url.as_str(),
            "https://www.zigbee2mqtt.io/supported-devices/#v=IKEA"
        );
    }

    #[test]
    fn model_url_encodes_slashes() {
        let url = model_url("TS011F/plug");
        assert_eq!(
            url.as_str(),
            "https://www.zigbee2mqtt.io/devices/TS011F%2Fplug.html"
        );
    }
}
