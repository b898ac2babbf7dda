//! Sample public keys, base64 encoded as submitted to the registrar.

/// Ed25519 public key from RFC 8032, test 1.
pub const ED25519_1: &str = "11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=";

/// Base58 encoding of [`ED25519_1`].
pub const ED25519_1_BASE58: &str = "FVen3X669xLzsi6N2V91DoiyzHzg1uAgqiT8jZ9nS96Z";

/// Ed25519 public key from RFC 8032, test 2.
pub const ED25519_2: &str = "PUAXw+hDiVqStwqnTRt+vJyYLM8uxJaMwM1V8Sr0Zgw=";

/// Base58 encoding of [`ED25519_2`].
pub const ED25519_2_BASE58: &str = "586Z7H2vpX9qNhN2T4e9Utugie3ogjbxzGaMtM3E6HR5";

/// Ed25519 public key from RFC 8032, test 3.
pub const ED25519_3: &str = "/FHNjmIYoaONpH7QAjDwWAgW7RO6MwOsXeuRFUiQgCU=";

/// The P-256 generator point, uncompressed.
pub const P256_1: &str =
    "BGsX0fLhLEJH+Lzm5WOkQPJ3A32BLeszoPShOUXYmMKWT+NC4v4af5uO5+tKfA+eFivOM1drMV7Oy7ZAaDe/UfU=";

/// Base58 encoding of [`P256_1`].
pub const P256_1_BASE58: &str =
    "Pcd5VhRJKanEXiWsBpiuxUjzFzCbY8zK9kJunuTpPxwnV7c7D7DeaUmkz4KhhXD3d2QyuF4NgpRYcjb1hZRdTTXr";
