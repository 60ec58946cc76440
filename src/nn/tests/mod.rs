mod module_trait;
mod var_ops;
