use serde::{Deserialize, Serialize};

/// One GPU model as advertised by the API.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GpuType {
    pub id: String,
    pub display_name: String,
    /// Occasionally absent from listings; treated as 0 GB.
    #[serde(default)]
    pub memory_in_gb: u32,
    #[serde(default)]
    pub secure_cloud: bool,
    #[serde(default)]
    pub community_cloud: bool,
    #[serde(default)]
    pub secure_price: Option<f64>,
    #[serde(default)]
    pub lowest_price: Option<LowestPrice>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LowestPrice {
    #[serde(default)]
    pub minimum_bid_price: Option<f64>,
    #[serde(default)]
    pub uninterruptable_price: Option<f64>,
}

/// A secure-cloud GPU the account could deploy on, with an hourly price
/// when the API quotes one.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuOffer {
    pub id: String,
    pub name: String,
    pub memory_gb: u32,
    pub price: Option<f64>,
}

impl From<GpuType> for GpuOffer {
    fn from(gpu: GpuType) -> Self {
        let price = gpu
            .secure_price
            .or_else(|| gpu.lowest_price.and_then(|p| p.uninterruptable_price));
        Self {
            id: gpu.id,
            name: gpu.display_name,
            memory_gb: gpu.memory_in_gb,
            price,
        }
    }
}

/// Filter the raw GPU listing down to secure-cloud types with at least
/// `min_memory_gb` of VRAM, largest first.
pub fn secure_offers(gpu_types: Vec<GpuType>, min_memory_gb: u32) -> Vec<GpuOffer> {
    let mut offers: Vec<GpuOffer> = gpu_types
        .into_iter()
        .filter(|gpu| gpu.secure_cloud && gpu.memory_in_gb >= min_memory_gb)
        .map(GpuOffer::from)
        .collect();
    offers.sort_by(|a, b| b.memory_gb.cmp(&a.memory_gb));
    offers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpu(
        name: &str,
        memory: u32,
        secure: bool,
        secure_price: Option<f64>,
        uninterruptable: Option<f64>,
    ) -> GpuType {
        GpuType {
            id: name.to_string(),
            display_name: name.to_string(),
            memory_in_gb: memory,
            secure_cloud: secure,
            community_cloud: !secure,
            secure_price,
            lowest_price: Some(LowestPrice {
                minimum_bid_price: None,
                uninterruptable_price: uninterruptable,
            }),
        }
    }

    #[test]
    fn filters_by_cloud_tier_and_memory_floor() {
        let offers = secure_offers(
            vec![
                gpu("NVIDIA A40", 48, true, Some(0.39), None),
                gpu("NVIDIA RTX 2000 Ada", 16, true, Some(0.28), None),
                gpu("NVIDIA GeForce RTX 3070", 8, true, Some(0.13), None),
                gpu("NVIDIA GeForce RTX 4090", 24, false, None, Some(0.34)),
            ],
            16,
        );
        let names: Vec<_> = offers.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["NVIDIA A40", "NVIDIA RTX 2000 Ada"]);
    }

    #[test]
    fn sorts_by_memory_descending() {
        let offers = secure_offers(
            vec![
                gpu("16G", 16, true, Some(1.0), None),
                gpu("80G", 80, true, Some(4.0), None),
                gpu("24G", 24, true, Some(2.0), None),
            ],
            16,
        );
        let memory: Vec<_> = offers.iter().map(|o| o.memory_gb).collect();
        assert_eq!(memory, [80, 24, 16]);
    }

    #[test]
    fn price_falls_back_to_on_demand_quote() {
        let direct = GpuOffer::from(gpu("direct", 24, true, Some(0.69), Some(0.74)));
        assert_eq!(direct.price, Some(0.69));

        let quoted = GpuOffer::from(gpu("quoted", 24, true, None, Some(0.74)));
        assert_eq!(quoted.price, Some(0.74));

        let mut unpriced = gpu("unpriced", 24, true, None, None);
        unpriced.lowest_price = None;
        assert_eq!(GpuOffer::from(unpriced).price, None);
    }

    #[test]
    fn missing_memory_never_passes_the_floor() {
        let offers = secure_offers(vec![gpu("odd", 0, true, Some(0.1), None)], 16);
        assert!(offers.is_empty());
    }

    #[test]
    fn deserializes_pricing_payload() {
        let gpu: GpuType = serde_json::from_value(serde_json::json!({
            "id": "NVIDIA A40",
            "displayName": "A40",
            "memoryInGb": 48,
            "secureCloud": true,
            "communityCloud": false,
            "securePrice": 0.39,
            "lowestPrice": {
                "minimumBidPrice": 0.2,
                "uninterruptablePrice": 0.35
            }
        }))
        .unwrap();

        assert_eq!(gpu.memory_in_gb, 48);
        assert!(gpu.secure_cloud);
        assert_eq!(GpuOffer::from(gpu).price, Some(0.39));
    }

    #[test]
    fn null_prices_deserialize() {
        let gpu: GpuType = serde_json::from_value(serde_json::json!({
            "id": "NVIDIA H100",
            "displayName": "H100",
            "memoryInGb": 80,
            "secureCloud": true,
            "communityCloud": false,
            "securePrice": null,
            "lowestPrice": null
        }))
        .unwrap();

        assert_eq!(GpuOffer::from(gpu).price, None);
    }
}
