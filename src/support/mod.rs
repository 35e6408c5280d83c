pub mod soap_envelope;
pub mod wsdl;
pub mod xml_tree;
