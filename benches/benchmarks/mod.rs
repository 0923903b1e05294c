pub mod fermi_map;
pub mod rdm_kernel;
pub mod tensor_op;
