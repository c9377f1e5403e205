/// Kakao Local API endpoints and the user-facing message catalog.
/// Messages are the storefront's Korean copy and must stay byte-for-byte
/// identical to what the address widget displays.

// Kakao Local API
pub const KAKAO_BASE_URL: &str = "https://dapi.kakao.com";
pub const ADDRESS_SEARCH_PATH: &str = "/v2/local/search/address.json";
pub const KEYWORD_SEARCH_PATH: &str = "/v2/local/search/keyword.json";
pub const COORD_TO_ADDRESS_PATH: &str = "/v2/local/geo/coord2address.json";

/// Environment variable holding the server-side REST credential.
pub const KAKAO_API_KEY_ENV: &str = "KAKAO_REST_API_KEY";

// Request validation
pub const MSG_QUERY_REQUIRED: &str = "검색어가 필요합니다.";
pub const MSG_COORDS_REQUIRED: &str = "좌표 정보가 필요합니다.";
pub const MSG_API_KEY_MISSING: &str = "API 키가 설정되지 않았습니다.";

// Upstream failures (generic fallbacks when the provider sends no message)
pub const MSG_PROVIDER_CALL_FAILED: &str = "카카오 API 호출에 실패했습니다.";
pub const MSG_ADDRESS_SEARCH_FAILED: &str = "주소 검색에 실패했습니다.";
pub const MSG_KEYWORD_SEARCH_FAILED: &str = "키워드 검색에 실패했습니다.";
pub const MSG_COORD_CONVERT_FAILED: &str = "좌표 변환에 실패했습니다.";

// Reverse geocoding
pub const MSG_NO_ADDRESS_AT_LOCATION: &str = "해당 위치의 주소를 찾을 수 없습니다.";
pub const MSG_ADDRESS_NOT_FOUND: &str = "주소를 찾을 수 없습니다.";

// Empty search results (per mode)
pub const MSG_NO_RESULTS_STRUCTURED: &str = "검색 결과가 없습니다. 정확한 주소를 입력해주세요.";
pub const MSG_NO_RESULTS_KEYWORD: &str = "검색 결과가 없습니다. 다른 키워드로 검색해보세요.";

// Device geolocation failures
pub const MSG_LOCATION_PERMISSION_DENIED: &str = "위치 접근 권한이 거부되었습니다.";
pub const MSG_LOCATION_UNAVAILABLE: &str = "위치 정보를 사용할 수 없습니다.";
pub const MSG_LOCATION_TIMEOUT: &str = "위치 요청 시간이 초과되었습니다.";
