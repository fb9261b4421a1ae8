// Re-export glam for convenience
pub use glam::*;

// Lagoon math types
mod aabb;
pub use aabb::Aabb;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec4_to_array() {
        let v = Vec4::new(0.1, 0.2, 0.3, 1.0);
        assert_eq!(v.to_array(), [0.1, 0.2, 0.3, 1.0]);
    }
}
