use ip_logger_data_management::DataManager;

pub struct ServerState {
    pub data_manager: DataManager,
}
