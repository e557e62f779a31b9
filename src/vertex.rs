use nalgebra::{Point2, Point3, RealField, Scalar, Vector3};
use num_traits::{FromPrimitive, ToPrimitive};
use ply_rs::ply::{self, Addable, ElementDef, PropertyDef, PropertyType, ScalarType};

pub trait BaseFloat:
    Scalar + RealField + FromPrimitive + ToPrimitive + PlyType + Copy
{
}

impl BaseFloat for f32 {}
impl BaseFloat for f64 {}

pub trait PlyType {
    fn ply_type() -> ScalarType;
}

impl PlyType for f32 {
    fn ply_type() -> ScalarType {
        ScalarType::Float
    }
}

impl PlyType for f64 {
    fn ply_type() -> ScalarType {
        ScalarType::Double
    }
}

/// one colored sample point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex<F: BaseFloat> {
    pub position: Point3<F>,
    pub color: Vector3<u8>,
}

/// the flattened image of a [`Vertex`], carrying the same color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVertex<F: BaseFloat> {
    pub position: Point2<F>,
    pub color: Vector3<u8>,
}

fn color_properties(element: &mut ElementDef) {
    let color_type = PropertyType::Scalar(ScalarType::UChar);
    for name in ["red", "green", "blue"] {
        element
            .properties
            .add(PropertyDef::new(name.to_string(), color_type.clone()));
    }
}

impl<F: BaseFloat> Vertex<F> {
    pub fn element_def(name: String) -> ElementDef {
        let pos_type = PropertyType::Scalar(F::ply_type());
        let mut element = ElementDef::new(name);
        for name in ["x", "y", "z"] {
            element
                .properties
                .add(PropertyDef::new(name.to_string(), pos_type.clone()));
        }
        color_properties(&mut element);
        return element;
    }
}

impl<F: BaseFloat> FlatVertex<F> {
    pub fn element_def(name: String) -> ElementDef {
        let pos_type = PropertyType::Scalar(F::ply_type());
        let mut element = ElementDef::new(name);
        for name in ["x", "y"] {
            element
                .properties
                .add(PropertyDef::new(name.to_string(), pos_type.clone()));
        }
        color_properties(&mut element);
        return element;
    }
}

impl<F: BaseFloat> ply::PropertyAccess for Vertex<F> {
    fn new() -> Self {
        Vertex {
            position: Point3::origin(),
            color: Vector3::zeros(),
        }
    }

    fn set_property(&mut self, key: String, property: ply::Property) {
        match (key.as_ref(), property) {
            ("x", ply::Property::Float(v)) => self.position[0] = F::from_f32(v).unwrap(),
            ("y", ply::Property::Float(v)) => self.position[1] = F::from_f32(v).unwrap(),
            ("z", ply::Property::Float(v)) => self.position[2] = F::from_f32(v).unwrap(),
            ("x", ply::Property::Double(v)) => self.position[0] = F::from_f64(v).unwrap(),
            ("y", ply::Property::Double(v)) => self.position[1] = F::from_f64(v).unwrap(),
            ("z", ply::Property::Double(v)) => self.position[2] = F::from_f64(v).unwrap(),
            ("red", ply::Property::UChar(v)) => self.color[0] = v,
            ("green", ply::Property::UChar(v)) => self.color[1] = v,
            ("blue", ply::Property::UChar(v)) => self.color[2] = v,
            (_, _) => {}
        };
    }

    #[inline]
    fn get_float(&self, property_name: &String) -> Option<f32> {
        match property_name.as_str() {
            "x" => self.position[0].to_f32(),
            "y" => self.position[1].to_f32(),
            "z" => self.position[2].to_f32(),
            _ => None,
        }
    }

    #[inline]
    fn get_double(&self, property_name: &String) -> Option<f64> {
        match property_name.as_str() {
            "x" => self.position[0].to_f64(),
            "y" => self.position[1].to_f64(),
            "z" => self.position[2].to_f64(),
            _ => None,
        }
    }

    #[inline]
    fn get_uchar(&self, property_name: &String) -> Option<u8> {
        match property_name.as_str() {
            "red" => Some(self.color.x),
            "green" => Some(self.color.y),
            "blue" => Some(self.color.z),
            _ => None,
        }
    }
}

impl<F: BaseFloat> ply::PropertyAccess for FlatVertex<F> {
    fn new() -> Self {
        FlatVertex {
            position: Point2::origin(),
            color: Vector3::zeros(),
        }
    }

    fn set_property(&mut self, key: String, property: ply::Property) {
        match (key.as_ref(), property) {
            ("x", ply::Property::Float(v)) => self.position[0] = F::from_f32(v).unwrap(),
            ("y", ply::Property::Float(v)) => self.position[1] = F::from_f32(v).unwrap(),
            ("x", ply::Property::Double(v)) => self.position[0] = F::from_f64(v).unwrap(),
            ("y", ply::Property::Double(v)) => self.position[1] = F::from_f64(v).unwrap(),
            ("red", ply::Property::UChar(v)) => self.color[0] = v,
            ("green", ply::Property::UChar(v)) => self.color[1] = v,
            ("blue", ply::Property::UChar(v)) => self.color[2] = v,
            (_, _) => {}
        };
    }

    #[inline]
    fn get_float(&self, property_name: &String) -> Option<f32> {
        match property_name.as_str() {
            "x" => self.position[0].to_f32(),
            "y" => self.position[1].to_f32(),
            _ => None,
        }
    }

    #[inline]
    fn get_double(&self, property_name: &String) -> Option<f64> {
        match property_name.as_str() {
            "x" => self.position[0].to_f64(),
            "y" => self.position[1].to_f64(),
            _ => None,
        }
    }

    #[inline]
    fn get_uchar(&self, property_name: &String) -> Option<u8> {
        match property_name.as_str() {
            "red" => Some(self.color.x),
            "green" => Some(self.color.y),
            "blue" => Some(self.color.z),
            _ => None,
        }
    }
}
