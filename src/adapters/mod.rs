//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                      |
//! |------------|--------------|----------------------------------|
//! | `hardware` | SensorPort   | SCD30 + BME280 on shared I2C     |
//! |            | ActuatorPort | LEDC PWM (LED, servo), GPIO horn and pixel line |
//! | `log_sink` | EventSink    | Serial log output                |
//! | `random`   | RandomSource | SmallRng, hardware-seeded        |
//! | `time`     | Clock        | ESP32 system timer, FreeRTOS     |

pub mod hardware;
pub mod log_sink;
pub mod random;
pub mod time;
