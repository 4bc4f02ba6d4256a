use serde::{Deserialize, Serialize};

pub type Id = u32;

fn default_waiting_chairs() -> u32 {
    3
}

fn default_barbers() -> u32 {
    1
}

fn default_cut_time_ms() -> u64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default = "default_waiting_chairs")]
    pub waiting_chairs: u32, // Maximum number of customers waiting at the same time
    #[serde(default = "default_barbers")]
    pub barbers: u32, // Number of service chairs, the chair index doubles as the barber id
}

impl Default for ShopConfig {
    fn default() -> ShopConfig {
        ShopConfig {
            waiting_chairs: default_waiting_chairs(),
            barbers: default_barbers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerConfig {
    pub id: Id,
    pub arrival_offset_ms: u64, // How long after the shop opens this customer walks in
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub shop: ShopConfig,
    #[serde(default = "default_cut_time_ms")]
    pub cut_time_ms: u64, // How long one hair-cut takes
    pub customers: Vec<CustomerConfig>,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            shop: ShopConfig::default(),
            cut_time_ms: default_cut_time_ms(),
            customers: (0..6)
                .map(|id| CustomerConfig {
                    id,
                    arrival_offset_ms: u64::from(id) * 50,
                })
                .collect(),
        }
    }
}
