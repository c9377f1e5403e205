pub mod kakao;

pub use kakao::{GeocodingApi, KakaoClient};
